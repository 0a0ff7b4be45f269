use serde::Serialize;

/// A single decode failure. Rules report failures as plain strings; this
/// enum is the source of every message the crate itself produces.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The whole payload is missing or `null`.
    #[error("cannot deserialize null or undefined")]
    PayloadAbsent,

    /// A typed-default rule found no value and has no default to fall back on.
    #[error("required {type_name} missing and no default")]
    MissingWithoutDefault { type_name: String },

    /// A free-form rule found no value for a required field.
    #[error("required field '{field}' missing from object")]
    MissingField { field: String },

    /// A present value failed its leaf type check.
    #[error("field '{field}' is not a {type_name}")]
    TypeMismatch { field: String, type_name: String },

    /// Two fragments wrote the same output key.
    #[error("duplicate field '{field}' in decoded record")]
    DuplicateField { field: String },
}

impl From<DecodeError> for String {
    fn from(e: DecodeError) -> Self {
        e.to_string()
    }
}

/// Every message produced by a failed decode, in rule table order.
///
/// Never empty when returned from the engine. Serializes as a JSON array of
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("{}", .0.join("; "))]
pub struct DecodeErrors(Vec<String>);

impl DecodeErrors {
    pub fn new(messages: Vec<String>) -> Self {
        DecodeErrors(messages)
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn into_messages(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl From<DecodeError> for DecodeErrors {
    fn from(e: DecodeError) -> Self {
        DecodeErrors(vec![e.to_string()])
    }
}

impl IntoIterator for DecodeErrors {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DecodeErrors {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<S: AsRef<str>> PartialEq<[S]> for DecodeErrors {
    fn eq(&self, other: &[S]) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b.as_ref())
    }
}

impl<S: AsRef<str>, const N: usize> PartialEq<[S; N]> for DecodeErrors {
    fn eq(&self, other: &[S; N]) -> bool {
        *self == other[..]
    }
}
