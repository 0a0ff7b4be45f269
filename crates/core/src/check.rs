//! Building blocks for free-form rules.
//!
//! Each check names the field it guards so its failure message can stand on
//! its own: the engine does not prefix free-form messages. Checks compose
//! with `Result::and_then`; the `is_*` and `required_field` forms bind the
//! field name first and return a closure awaiting the value.
//!
//! ```
//! use serde_json::json;
//! use sift_core::check;
//!
//! let payload = json!({"theProperty": 1});
//! let result = check::required("theProperty", payload.get("theProperty"))
//!     .and_then(check::is_boolean("theProperty"));
//! assert_eq!(result, Err("field 'theProperty' is not a boolean".to_string()));
//! ```

use serde_json::Value;

use crate::error::DecodeError;
use crate::payload::present;

/// Fail when the value is absent or `null`.
pub fn required<'a>(field: &str, value: Option<&'a Value>) -> Result<&'a Value, String> {
    present(value).ok_or_else(|| {
        DecodeError::MissingField {
            field: field.to_string(),
        }
        .into()
    })
}

/// Wrap presence in an `Option`. Never fails.
pub fn optional(value: Option<&Value>) -> Result<Option<&Value>, String> {
    Ok(present(value))
}

fn mismatch(field: &str, type_name: &str) -> String {
    DecodeError::TypeMismatch {
        field: field.to_string(),
        type_name: type_name.to_string(),
    }
    .into()
}

pub fn number(field: &str, value: &Value) -> Result<f64, String> {
    value.as_f64().ok_or_else(|| mismatch(field, "number"))
}

pub fn integer(field: &str, value: &Value) -> Result<i64, String> {
    value.as_i64().ok_or_else(|| mismatch(field, "integer"))
}

pub fn string(field: &str, value: &Value) -> Result<String, String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| mismatch(field, "string"))
}

pub fn boolean(field: &str, value: &Value) -> Result<bool, String> {
    value.as_bool().ok_or_else(|| mismatch(field, "boolean"))
}

// ── Curried forms ───────────────────────────────────────────────────

pub fn required_field(field: &str) -> impl Fn(Option<&Value>) -> Result<&Value, String> + '_ {
    move |value| required(field, value)
}

pub fn is_number(field: &str) -> impl Fn(&Value) -> Result<f64, String> + '_ {
    move |value| number(field, value)
}

pub fn is_integer(field: &str) -> impl Fn(&Value) -> Result<i64, String> + '_ {
    move |value| integer(field, value)
}

pub fn is_string(field: &str) -> impl Fn(&Value) -> Result<String, String> + '_ {
    move |value| string(field, value)
}

pub fn is_boolean(field: &str) -> impl Fn(&Value) -> Result<bool, String> + '_ {
    move |value| boolean(field, value)
}
