//! Typed-default field rules.
//!
//! A [`Rule`] bundles a declared type name, a default, and a decode function
//! that sees the field's raw value. The rule hands itself to its decode
//! function so the function can read the type name and default it was
//! declared with.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::DecodeError;

type DecodeFn<T> = dyn Fn(&Rule<T>, Option<&Value>) -> Result<T, String> + Send + Sync;

/// Decode contract for one field of a record.
pub struct Rule<T> {
    type_name: String,
    default: Option<T>,
    decode: Arc<DecodeFn<T>>,
}

impl<T> Rule<T> {
    /// A rule with a custom decode function.
    pub fn new<F>(type_name: impl Into<String>, default: Option<T>, decode: F) -> Self
    where
        F: Fn(&Rule<T>, Option<&Value>) -> Result<T, String> + Send + Sync + 'static,
    {
        Rule {
            type_name: type_name.into(),
            default,
            decode: Arc::new(decode),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    /// Replace the default used when the field is absent.
    pub fn with_default(mut self, default: T) -> Self {
        self.default = Some(default);
        self
    }

    pub fn decode(&self, value: Option<&Value>) -> Result<T, String> {
        (self.decode)(self, value)
    }
}

impl<T: Clone + 'static> Rule<T> {
    /// A required field decoded by `leaf`, with no default until
    /// [`with_default`](Rule::with_default) sets one.
    pub fn required<L>(type_name: impl Into<String>, leaf: L) -> Self
    where
        L: Fn(Option<&Value>) -> Option<T> + Send + Sync + 'static,
    {
        Rule::new(type_name, None, move |rule: &Rule<T>, value| {
            required(&leaf, rule.default.clone(), &rule.type_name, value)
        })
    }
}

impl<T: 'static> Rule<Option<T>> {
    /// An optional field. Absence decodes to `None` instead of failing.
    pub fn optional<L>(type_name: impl Into<String>, leaf: L) -> Self
    where
        L: Fn(Option<&Value>) -> Option<T> + Send + Sync + 'static,
    {
        Rule::new(type_name, None, move |_: &Rule<Option<T>>, value| {
            optional(&leaf, value)
        })
    }
}

impl<T: Clone> Clone for Rule<T> {
    fn clone(&self) -> Self {
        Rule {
            type_name: self.type_name.clone(),
            default: self.default.clone(),
            decode: Arc::clone(&self.decode),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("type_name", &self.type_name)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

/// Decode `value` with `leaf`, falling back to `default` when the leaf
/// yields nothing.
pub fn required<T>(
    leaf: impl Fn(Option<&Value>) -> Option<T>,
    default: Option<T>,
    type_name: &str,
    value: Option<&Value>,
) -> Result<T, String> {
    leaf(value).or(default).ok_or_else(|| {
        DecodeError::MissingWithoutDefault {
            type_name: type_name.to_string(),
        }
        .into()
    })
}

/// Decode `value` with `leaf`. Never fails.
pub fn optional<T>(
    leaf: impl Fn(Option<&Value>) -> Option<T>,
    value: Option<&Value>,
) -> Result<Option<T>, String> {
    Ok(leaf(value))
}

/// [`required`] with everything but the value bound up front.
pub fn required_with<T, L>(
    leaf: L,
    default: Option<T>,
    type_name: impl Into<String>,
) -> impl Fn(Option<&Value>) -> Result<T, String>
where
    T: Clone,
    L: Fn(Option<&Value>) -> Option<T>,
{
    let type_name = type_name.into();
    move |value| required(&leaf, default.clone(), &type_name, value)
}

/// [`optional`] with the leaf bound up front.
pub fn optional_with<T, L>(leaf: L) -> impl Fn(Option<&Value>) -> Result<Option<T>, String>
where
    L: Fn(Option<&Value>) -> Option<T>,
{
    move |value| optional(&leaf, value)
}
