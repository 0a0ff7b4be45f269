//! Leaf decoders: primitive type checks from an untyped value to an
//! optional typed one.
//!
//! A leaf never fails loudly. Absent input or a value of the wrong JSON type
//! yields `None`; the rule that calls the leaf decides what that means.

use serde_json::Value;

/// Any JSON number, as `f64`.
pub fn number(value: Option<&Value>) -> Option<f64> {
    value?.as_f64()
}

/// JSON integers that fit in `i64`. `1.5` is not an integer; `1.0` is not
/// either, since serde_json keeps the float representation.
pub fn integer(value: Option<&Value>) -> Option<i64> {
    value?.as_i64()
}

pub fn string(value: Option<&Value>) -> Option<String> {
    value?.as_str().map(str::to_owned)
}

pub fn boolean(value: Option<&Value>) -> Option<bool> {
    value?.as_bool()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number() {
        assert_eq!(number(Some(&json!(12))), Some(12.0));
        assert_eq!(number(Some(&json!(-0.5))), Some(-0.5));
        assert_eq!(number(Some(&json!("12"))), None);
        assert_eq!(number(Some(&Value::Null)), None);
        assert_eq!(number(None), None);
    }

    #[test]
    fn test_integer() {
        assert_eq!(integer(Some(&json!(7))), Some(7));
        assert_eq!(integer(Some(&json!(1.5))), None);
        assert_eq!(integer(Some(&json!(true))), None);
    }

    #[test]
    fn test_string() {
        assert_eq!(string(Some(&json!("hi"))), Some("hi".to_string()));
        assert_eq!(string(Some(&json!(""))), Some(String::new()));
        assert_eq!(string(Some(&json!(12))), None);
        assert_eq!(string(None), None);
    }

    #[test]
    fn test_boolean() {
        assert_eq!(boolean(Some(&json!(false))), Some(false));
        assert_eq!(boolean(Some(&json!(1))), None);
        assert_eq!(boolean(Some(&json!("true"))), None);
    }
}
