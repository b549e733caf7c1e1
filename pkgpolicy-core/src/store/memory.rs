//! In-memory policy store

use std::collections::BTreeMap;

use super::PolicyStore;

/// A single stored value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreValue {
    /// Native integer value
    Integer(i64),
    /// Native string value
    String(String),
    /// Present, but of a type no policy reads (the payload names the type)
    Unsupported(&'static str),
}

/// Policy root held in memory
///
/// Values and sub-keys live in separate namespaces. Children of a sub-key
/// keep the order they were first written in.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, StoreValue>,
    sub_keys: BTreeMap<String, Vec<(String, StoreValue)>>,
}

impl MemoryStore {
    /// Create an empty policy root
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a top-level value, replacing any previous one
    pub fn set_value(&mut self, name: impl Into<String>, value: StoreValue) {
        self.values.insert(name.into(), value);
    }

    /// Write a top-level integer value
    pub fn set_integer(&mut self, name: impl Into<String>, value: i64) {
        self.set_value(name, StoreValue::Integer(value));
    }

    /// Write a top-level string value
    pub fn set_string(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set_value(name, StoreValue::String(value.into()));
    }

    /// Create a sub-key with no children (no-op if it already exists)
    pub fn create_sub_key(&mut self, key: impl Into<String>) {
        self.sub_keys.entry(key.into()).or_default();
    }

    /// Write a child value under a sub-key, creating the sub-key as needed
    ///
    /// Rewriting an existing child replaces it in place.
    pub fn set_sub_value(
        &mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        value: StoreValue,
    ) {
        let name = name.into();
        let children = self.sub_keys.entry(key.into()).or_default();
        match children.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => children.push((name, value)),
        }
    }

    /// Write a string child under a sub-key
    pub fn set_sub_string(
        &mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.set_sub_value(key, name, StoreValue::String(value.into()));
    }

    /// Whether the root holds no values and no sub-keys
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.sub_keys.is_empty()
    }
}

impl PolicyStore for MemoryStore {
    fn has_value(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    fn read_integer(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(StoreValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    fn read_string(&self, name: &str) -> Option<String> {
        match self.values.get(name) {
            Some(StoreValue::String(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn sub_values(&self, key: &str) -> Option<Vec<String>> {
        self.sub_keys.get(key).map(|children| {
            children
                .iter()
                .filter_map(|(_, value)| match value {
                    StoreValue::String(payload) => Some(payload.clone()),
                    _ => None,
                })
                .collect()
        })
    }
}
