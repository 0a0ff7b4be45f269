//! Rule tables.
//!
//! A [`Schema`] maps field names to rules, in declaration order. Three kinds
//! of rule can be declared:
//!
//! - [`Schema::field`]: a typed-default [`Rule`] plus a setter. The rule sees
//!   the field's raw value and its failures are prefixed with `"{name}: "`.
//! - [`Schema::rule`]: a free-form rule that sees the field's raw value and
//!   returns a [`Fragment`]. Its messages are reported unchanged.
//! - [`Schema::payload_rule`]: a free-form rule that sees the whole payload.
//!
//! Rules are shared behind `Arc`, so cloning a schema is cheap and a schema
//! can be used from several threads at once.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::decode::decode;
use crate::error::DecodeErrors;
use crate::fragment::Fragment;
use crate::payload;
use crate::rule::Rule;

type Evaluate<D> = dyn Fn(&Value) -> Result<Fragment<D>, String> + Send + Sync;

pub(crate) struct Entry<D> {
    pub(crate) name: String,
    evaluate: Arc<Evaluate<D>>,
}

impl<D> Entry<D> {
    pub(crate) fn evaluate(&self, payload: &Value) -> Result<Fragment<D>, String> {
        (self.evaluate)(payload)
    }
}

/// A fixed mapping from field name to rule, describing how to decode a
/// record `D`.
pub struct Schema<D> {
    entries: Vec<Entry<D>>,
}

impl<D: 'static> Schema<D> {
    pub fn new() -> Self {
        Schema {
            entries: Vec::new(),
        }
    }

    /// Declare a typed-default field. `set` stores the decoded value in the
    /// record.
    pub fn field<T, S>(self, name: impl Into<String>, rule: Rule<T>, set: S) -> Self
    where
        T: Send + Sync + 'static,
        S: Fn(&mut D, T) + Send + Sync + 'static,
    {
        let name = name.into();
        let key = name.clone();
        let set = Arc::new(set);
        self.insert(
            name,
            Arc::new(move |payload: &Value| {
                let set = Arc::clone(&set);
                rule.decode(payload::field(payload, &key))
                    .map(|value| {
                        Fragment::single(key.clone(), move |record: &mut D| set(record, value))
                    })
                    .map_err(|e| format!("{}: {}", key, e))
            }),
        )
    }

    /// Declare a free-form rule over the field's raw value.
    pub fn rule<F>(self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(Option<&Value>) -> Result<Fragment<D>, String> + Send + Sync + 'static,
    {
        let name = name.into();
        let key = name.clone();
        self.insert(
            name,
            Arc::new(move |payload: &Value| rule(payload::field(payload, &key))),
        )
    }

    /// Declare a free-form rule over the whole payload. The rule still
    /// occupies `name` in the table.
    pub fn payload_rule<F>(self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&Value) -> Result<Fragment<D>, String> + Send + Sync + 'static,
    {
        self.insert(name.into(), Arc::new(rule))
    }
}

impl<D> Schema<D> {
    fn insert(mut self, name: String, evaluate: Arc<Evaluate<D>>) -> Self {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => {
                warn!(field = %name, "field declared twice; later rule replaces earlier");
                existing.evaluate = evaluate;
            }
            None => self.entries.push(Entry { name, evaluate }),
        }
        self
    }

    /// Field names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &[Entry<D>] {
        &self.entries
    }

    /// Decode one payload. Same as [`decode`](crate::decode()).
    pub fn decode(&self, payload: Option<&Value>) -> Result<D, DecodeErrors>
    where
        D: Default,
    {
        decode(self, payload)
    }
}

impl<D: 'static> Default for Schema<D> {
    fn default() -> Self {
        Schema::new()
    }
}

impl<D> Clone for Schema<D> {
    fn clone(&self) -> Self {
        Schema {
            entries: self
                .entries
                .iter()
                .map(|e| Entry {
                    name: e.name.clone(),
                    evaluate: Arc::clone(&e.evaluate),
                })
                .collect(),
        }
    }
}

impl<D> fmt::Debug for Schema<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
