//! Raw listing records.

use std::ops::Index;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record of a container listing, exactly as returned by the server.
///
/// Typical keys are `name`, `bytes`, `content_type`, `hash` and
/// `last_modified`; pseudo-directories produced by a delimiter carry only
/// `subdir`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileEntry(Map<String, Value>);

impl FileEntry {
    /// Creates an entry from an attribute map.
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self(attributes)
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value stored under `key` if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Returns the value stored under `key` if it is an unsigned integer.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.0.get(key).and_then(Value::as_u64)
    }

    /// Returns whether the entry carries `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the object name, or the pseudo-directory name for `subdir` entries.
    pub fn name(&self) -> Option<&str> {
        self.get_str("name").or_else(|| self.get_str("subdir"))
    }

    /// Iterates over the attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Returns the underlying attribute map.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the entry and returns the underlying attribute map.
    pub fn into_attributes(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for FileEntry {
    fn from(attributes: Map<String, Value>) -> Self {
        Self(attributes)
    }
}

impl Index<&str> for FileEntry {
    type Output = Value;

    /// Returns [`Value::Null`] for missing keys, like indexing a JSON object.
    fn index(&self, key: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.0.get(key).unwrap_or(&NULL)
    }
}
