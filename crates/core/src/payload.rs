//! Access to the untyped payload.
//!
//! A payload is any `serde_json::Value`. Missing values and JSON `null`
//! collapse to one absent case at both the payload and the field level.

use serde_json::Value;

/// Treat `null` as absent.
pub fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Look up a field's raw value in a payload.
///
/// Non-object payloads have no fields, so every lookup on them is absent.
pub fn field<'a>(payload: &'a Value, name: &str) -> Option<&'a Value> {
    present(payload.as_object().and_then(|obj| obj.get(name)))
}
