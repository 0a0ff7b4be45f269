//! The record decode engine.
//!
//! Every rule in the table is evaluated against the payload, independently
//! of every other rule. Failures are collected rather than short-circuited;
//! only when every rule succeeds are the fragments merged into a record.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{DecodeError, DecodeErrors};
use crate::fragment::Fragment;
use crate::payload;
use crate::schema::Schema;

/// Decode `payload` against `schema`.
///
/// An absent or `null` payload fails with a single
/// [`DecodeError::PayloadAbsent`] message before any rule runs. Otherwise the
/// result is either the merged record or every failure message, in table
/// order.
pub fn decode<D: Default>(schema: &Schema<D>, payload: Option<&Value>) -> Result<D, DecodeErrors> {
    let Some(payload) = payload::present(payload) else {
        debug!("payload absent");
        return Err(DecodeError::PayloadAbsent.into());
    };

    let mut fragments = Vec::with_capacity(schema.len());
    let mut errors = Vec::new();

    for entry in schema.entries() {
        match entry.evaluate(payload) {
            Ok(fragment) => {
                trace!(field = %entry.name, keys = fragment.len(), "rule passed");
                fragments.push(fragment);
            }
            Err(message) => {
                trace!(field = %entry.name, %message, "rule failed");
                errors.push(message);
            }
        }
    }

    if !errors.is_empty() {
        debug!(
            fields = schema.len(),
            failures = errors.len(),
            "payload rejected"
        );
        return Err(DecodeErrors::new(errors));
    }

    let record = merge(fragments)?;
    debug!(fields = schema.len(), "payload decoded");
    Ok(record)
}

/// Bind `schema` into a reusable decoder.
///
/// The returned closure owns the schema and is equivalent to calling
/// [`decode`] with it.
pub fn decoder<D: Default>(
    schema: Schema<D>,
) -> impl Fn(Option<&Value>) -> Result<D, DecodeErrors> {
    move |payload| decode(&schema, payload)
}

/// Apply fragments in order. Each output key may be written once; every
/// repeated write is reported and the record is discarded.
fn merge<D: Default>(fragments: Vec<Fragment<D>>) -> Result<D, DecodeErrors> {
    let mut record = D::default();
    let mut written = HashSet::new();
    let mut conflicts = Vec::new();

    for fragment in fragments {
        for (key, apply) in fragment.into_entries() {
            if written.contains(&key) {
                conflicts.push(DecodeError::DuplicateField { field: key }.to_string());
                continue;
            }
            apply(&mut record);
            written.insert(key);
        }
    }

    if conflicts.is_empty() {
        Ok(record)
    } else {
        debug!(conflicts = conflicts.len(), "fragments overlap");
        Err(DecodeErrors::new(conflicts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check;
    use crate::leaf;
    use crate::rule::Rule;
    use serde_json::json;

    const ABSENT: &str = "cannot deserialize null or undefined";

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Data {
        the_property: bool,
    }

    fn boolean_schema() -> Schema<Data> {
        Schema::<Data>::new().rule("theProperty", |value| {
            check::required("theProperty", value)
                .and_then(check::is_boolean("theProperty"))
                .map(|v| Fragment::single("theProperty", move |d: &mut Data| d.the_property = v))
        })
    }

    #[test]
    fn empty_payloads() {
        let op = decoder(boolean_schema());
        assert_eq!(op(None).unwrap_err(), [ABSENT]);
        assert_eq!(op(Some(&Value::Null)).unwrap_err(), [ABSENT]);
    }

    #[test]
    fn absent_payload_skips_rules() {
        let schema = Schema::<Data>::new()
            .payload_rule("boom", |_| -> Result<Fragment<Data>, String> {
                panic!("rule evaluated for absent payload")
            });
        assert_eq!(decode(&schema, None).unwrap_err(), [ABSENT]);
    }

    #[test]
    fn incomplete_types() {
        let err = decode(&boolean_schema(), Some(&json!({}))).unwrap_err();
        assert_eq!(err, ["required field 'theProperty' missing from object"]);
    }

    #[test]
    fn incorrect_types() {
        let err = decode(&boolean_schema(), Some(&json!({"theProperty": 1}))).unwrap_err();
        assert_eq!(err, ["field 'theProperty' is not a boolean"]);
    }

    #[test]
    fn complete_types() {
        let record = decode(&boolean_schema(), Some(&json!({"theProperty": true}))).unwrap();
        assert_eq!(record, Data { the_property: true });
    }

    #[test]
    fn extra_payload_keys_are_ignored() {
        let payload = json!({"theProperty": false, "unrelated": [1, 2, 3]});
        let record = decode(&boolean_schema(), Some(&payload)).unwrap();
        assert_eq!(record, Data { the_property: false });
    }

    #[test]
    fn non_object_payload_reads_fields_as_absent() {
        let err = decode(&boolean_schema(), Some(&json!(42))).unwrap_err();
        assert_eq!(err, ["required field 'theProperty' missing from object"]);
    }

    #[derive(Debug, Default, PartialEq)]
    struct Pair {
        left: f64,
        right: Option<String>,
    }

    #[test]
    fn every_failure_is_reported_in_table_order() {
        let schema = Schema::<Pair>::new()
            .field("left", Rule::required("number", leaf::number), |p, v| {
                p.left = v
            })
            .rule("right", |value| {
                check::required("right", value)
                    .and_then(check::is_string("right"))
                    .map(|v| Fragment::single("right", move |p: &mut Pair| p.right = Some(v)))
            });

        let err = decode(&schema, Some(&json!({"left": "x", "right": 1}))).unwrap_err();
        assert_eq!(
            err,
            [
                "left: required number missing and no default",
                "field 'right' is not a string",
            ]
        );
    }

    #[test]
    fn payload_rule_sees_whole_payload() {
        let schema = Schema::<Pair>::new()
            .field("left", Rule::required("number", leaf::number), |p, v| {
                p.left = v
            })
            .payload_rule("right", |payload| {
                let left = payload.get("left").and_then(Value::as_f64);
                let label = payload.get("label").and_then(Value::as_str);
                match (left, label) {
                    (Some(n), Some(l)) => {
                        let joined = format!("{}={}", l, n);
                        Ok(Fragment::single("right", move |p: &mut Pair| {
                            p.right = Some(joined)
                        }))
                    }
                    _ => Err("right: needs 'left' and 'label'".to_string()),
                }
            });

        let record = decode(&schema, Some(&json!({"left": 2, "label": "w"}))).unwrap();
        assert_eq!(
            record,
            Pair {
                left: 2.0,
                right: Some("w=2".to_string())
            }
        );

        let err = decode(&schema, Some(&json!({"left": 2}))).unwrap_err();
        assert_eq!(err, ["right: needs 'left' and 'label'"]);
    }

    #[test]
    fn duplicate_output_keys_are_rejected() {
        let schema = Schema::<Pair>::new()
            .field("left", Rule::required("number", leaf::number), |p, v| {
                p.left = v
            })
            .rule("also_left", |_| {
                Ok(Fragment::single("left", |p: &mut Pair| p.left = -1.0))
            });

        let err = decode(&schema, Some(&json!({"left": 1}))).unwrap_err();
        assert_eq!(err, ["duplicate field 'left' in decoded record"]);
    }

    #[test]
    fn multi_key_fragments_merge() {
        let schema = Schema::<Pair>::new().rule("both", |value| {
            let n = check::required("both", value).and_then(check::is_number("both"))?;
            Ok(Fragment::single("left", move |p: &mut Pair| p.left = n)
                .with("right", move |p: &mut Pair| p.right = Some(n.to_string())))
        });

        let record = decode(&schema, Some(&json!({"both": 3}))).unwrap();
        assert_eq!(
            record,
            Pair {
                left: 3.0,
                right: Some("3".to_string())
            }
        );
    }

    #[test]
    fn empty_schema_decodes_default() {
        let schema = Schema::<Pair>::new();
        assert_eq!(decode(&schema, Some(&json!({}))), Ok(Pair::default()));
        assert_eq!(decode(&schema, None).unwrap_err(), [ABSENT]);
    }

    #[test]
    fn decoder_is_reusable() {
        let op = decoder(boolean_schema());
        let t = json!({"theProperty": true});
        let f = json!({"theProperty": false});
        assert_eq!(op(Some(&t)), Ok(Data { the_property: true }));
        assert_eq!(op(Some(&f)), Ok(Data { the_property: false }));
        assert_eq!(op(Some(&t)), Ok(Data { the_property: true }));
    }
}
