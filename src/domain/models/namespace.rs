//! Ordered configuration namespace.
//!
//! Static settings are inserted first; secrets documents are injected on
//! top with last-write-wins semantics. Values are stored verbatim as JSON.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::settings::Settings;
use crate::infrastructure::logging::SecretScrubber;

/// Top-level object of a secrets file, in document key order.
pub type SecretsDocument = Map<String, Value>;

/// Named configuration values in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsNamespace {
    entries: Map<String, Value>,
}

impl SettingsNamespace {
    /// Create an empty namespace
    pub fn new() -> Self {
        Self::default()
    }

    /// Namespace holding every statically declared setting.
    pub fn from_settings(settings: &Settings) -> Result<Self, serde_json::Error> {
        match serde_json::to_value(settings)? {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(serde::ser::Error::custom(format!(
                "settings serialized to {other}, expected an object"
            ))),
        }
    }

    /// Write every entry of `document` in document order, overwriting
    /// existing entries of the same name.
    ///
    /// Returns the names that shadowed an existing entry.
    pub fn inject(&mut self, document: SecretsDocument) -> Vec<String> {
        let mut overwritten = Vec::new();

        for (key, value) in document {
            if self.set(key.clone(), value).is_some() {
                tracing::debug!(key = %key, "secrets entry overrides existing setting");
                overwritten.push(key);
            } else {
                tracing::debug!(key = %key, "secrets entry added to namespace");
            }
        }

        overwritten
    }

    /// Set a value, returning the previous one.
    ///
    /// An existing key keeps its position.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Raw value of an entry
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Typed value of an entry; `Ok(None)` when absent.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, serde_json::Error> {
        self.entries
            .get(key)
            .map(|value| T::deserialize(value))
            .transpose()
    }

    /// Whether an entry exists
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entry names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the namespace is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of the namespace as a JSON object
    pub fn to_value(&self) -> Value {
        Value::Object(self.entries.clone())
    }

    /// Copy of the namespace with sensitive values masked, for display
    pub fn redacted(&self) -> Value {
        SecretScrubber::new().redact_value(&self.to_value())
    }
}
