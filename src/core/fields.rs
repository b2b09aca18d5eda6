//! Raw attribute storage for entities
//!
//! `FieldStore` holds the plain key/value payload of one remote row.
//! Enumeration order is the insertion order of the source payload, which
//! keeps write-payload assembly deterministic.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// The embedded identity/type descriptor carried in a raw payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    /// Canonical URL of the described object; the trailing path segment is
    /// the object's id.
    pub href: String,

    /// Wire name of the concrete entity type the server considers this row
    #[serde(rename = "type")]
    pub entity_type: String,

    #[serde(rename = "mediaType", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl Meta {
    /// Extract the object id from the href tail
    pub fn id(&self) -> Option<Uuid> {
        let path = self.href.split('?').next().unwrap_or("");
        path.trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|tail| Uuid::parse_str(tail).ok())
    }
}

/// Ordered key/value holder for one entity's raw attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldStore {
    inner: Map<String, Value>,
}

impl FieldStore {
    /// Build a store from any raw JSON value.
    ///
    /// Keyed mappings become fields directly. Sequences become index-keyed
    /// fields. A bare scalar is coerced into a single-element sequence, so
    /// degenerate rows do not fail construction.
    pub fn from_value(raw: Value) -> Self {
        let inner = match raw {
            Value::Object(map) => map,
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            scalar => std::iter::once(("0".to_string(), scalar)).collect(),
        };
        Self { inner }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.inner.insert(key.into(), value);
    }

    /// Remove a field, returning its previous value
    pub fn delete(&mut self, key: &str) -> Option<Value> {
        self.inner.shift_remove(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// The raw contents as a JSON object
    pub fn to_value(&self) -> Value {
        Value::Object(self.inner.clone())
    }

    /// Extract the embedded meta descriptor, if the payload carries one
    pub fn meta(&self) -> Option<Meta> {
        self.inner
            .get("meta")
            .and_then(|raw| serde_json::from_value(raw.clone()).ok())
    }
}

impl Serialize for FieldStore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}
