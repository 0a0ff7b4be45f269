//! TOML schema files.
//!
//! ```toml
//! [fields.name]
//! type = "string"
//! default = "anonymous"
//!
//! [fields.age]
//! type = "integer"
//! optional = true
//! ```
//!
//! Each `[fields.<name>]` table becomes one typed-default rule. Fields are
//! evaluated in lexicographic order of their names.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use sift_core::{leaf, Rule, Schema};
use tracing::debug;

/// Records decoded by a schema file are plain JSON objects.
pub(crate) type Record = Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub(crate) enum SchemaFileError {
    #[error("error reading schema '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("error parsing schema '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("schema '{path}' declares no fields")]
    Empty { path: String },

    #[error("field '{field}': default is not a {type_name}")]
    DefaultType {
        field: String,
        type_name: &'static str,
    },

    #[error("field '{field}': optional fields cannot declare a default")]
    OptionalDefault { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LeafType {
    Number,
    Integer,
    String,
    Boolean,
}

impl LeafType {
    pub(crate) fn name(self) -> &'static str {
        match self {
            LeafType::Number => "number",
            LeafType::Integer => "integer",
            LeafType::String => "string",
            LeafType::Boolean => "boolean",
        }
    }

    /// Type-check with the matching leaf decoder, keeping the original JSON
    /// representation of values that pass.
    fn decode(self, value: Option<&Value>) -> Option<Value> {
        let matches = match self {
            LeafType::Number => leaf::number(value).is_some(),
            LeafType::Integer => leaf::integer(value).is_some(),
            LeafType::String => leaf::string(value).is_some(),
            LeafType::Boolean => leaf::boolean(value).is_some(),
        };
        if matches {
            value.cloned()
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldSpec {
    #[serde(rename = "type")]
    leaf: LeafType,
    #[serde(default)]
    optional: bool,
    default: Option<toml::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    #[serde(default)]
    fields: BTreeMap<String, FieldSpec>,
}

pub(crate) fn load(path: &Path) -> Result<Schema<Record>, SchemaFileError> {
    let origin = path.display().to_string();
    let src = std::fs::read_to_string(path).map_err(|source| SchemaFileError::Io {
        path: origin.clone(),
        source,
    })?;
    parse(&src, &origin)
}

pub(crate) fn parse(src: &str, origin: &str) -> Result<Schema<Record>, SchemaFileError> {
    let file: SchemaFile = toml::from_str(src).map_err(|source| SchemaFileError::Parse {
        path: origin.to_string(),
        source,
    })?;

    if file.fields.is_empty() {
        return Err(SchemaFileError::Empty {
            path: origin.to_string(),
        });
    }

    let mut schema = Schema::<Record>::new();
    for (name, spec) in file.fields {
        schema = add_field(schema, name, spec)?;
    }

    debug!(schema = origin, fields = schema.len(), "schema loaded");
    Ok(schema)
}

fn add_field(
    schema: Schema<Record>,
    name: String,
    spec: FieldSpec,
) -> Result<Schema<Record>, SchemaFileError> {
    let leaf = spec.leaf;
    let key = name.clone();

    if spec.optional {
        if spec.default.is_some() {
            return Err(SchemaFileError::OptionalDefault { field: name });
        }
        let rule = Rule::optional(leaf.name(), move |v| leaf.decode(v));
        return Ok(schema.field(name, rule, move |record: &mut Record, v| {
            record.insert(key.clone(), v.unwrap_or(Value::Null));
        }));
    }

    let mut rule = Rule::required(leaf.name(), move |v| leaf.decode(v));
    if let Some(default) = spec.default {
        let value = serde_json::to_value(&default)
            .ok()
            .and_then(|json| leaf.decode(Some(&json)))
            .ok_or_else(|| SchemaFileError::DefaultType {
                field: name.clone(),
                type_name: leaf.name(),
            })?;
        rule = rule.with_default(value);
    }

    Ok(schema.field(name, rule, move |record: &mut Record, v| {
        record.insert(key.clone(), v);
    }))
}
