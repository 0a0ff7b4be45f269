//! sift-core: declarative decoding of untyped JSON payloads into typed
//! records.
//!
//! A [`Schema`] lists, per field, how to extract, validate, default, and
//! optionally wrap a value. [`decode`] runs every rule against a payload and
//! returns either the typed record or every failure message at once.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`decode()`] -- one-shot decode of a payload against a schema
//! - [`decoder()`] -- bind a schema into a reusable decode closure
//! - [`Schema`] -- the rule table builder
//! - [`Rule`] -- typed-default field rule (type name, default, decode)
//! - [`Fragment`] -- keyed partial record produced by free-form rules
//! - [`DecodeError`], [`DecodeErrors`] -- the error taxonomy
//!
//! Leaf decoders live in [`leaf`]; building blocks for free-form rules live
//! in [`check`].
//!
//! ```
//! use serde_json::json;
//! use sift_core::{decode, leaf, Rule, Schema};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct User {
//!     name: String,
//!     age: Option<i64>,
//! }
//!
//! let schema = Schema::<User>::new()
//!     .field("name", Rule::required("string", leaf::string), |u, v| u.name = v)
//!     .field("age", Rule::optional("integer", leaf::integer), |u, v| u.age = v);
//!
//! let user = decode(&schema, Some(&json!({"name": "ada"}))).unwrap();
//! assert_eq!(user, User { name: "ada".into(), age: None });
//!
//! let errors = decode(&schema, Some(&json!({"age": 3}))).unwrap_err();
//! assert_eq!(errors, ["name: required string missing and no default"]);
//! ```

pub mod check;
pub mod decode;
pub mod error;
pub mod fragment;
pub mod leaf;
pub mod payload;
pub mod rule;
pub mod schema;

// ── Convenience re-exports ───────────────────────────────────────────

pub use decode::{decode, decoder};
pub use error::{DecodeError, DecodeErrors};
pub use fragment::Fragment;
pub use rule::Rule;
pub use schema::Schema;
