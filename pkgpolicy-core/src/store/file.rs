//! Policy store loading from TOML files
//!
//! A policy export is a TOML document: top-level integers and strings are
//! values, top-level tables are sub-keys holding the ordered child entries.

use std::path::Path;

use toml::Value;

use super::{MemoryStore, StoreValue};
use crate::error::{StoreError, StoreResult};

/// Load a policy store snapshot from a TOML file
pub fn load_store_from_file(path: impl AsRef<Path>) -> StoreResult<MemoryStore> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.display().to_string(),
        source,
    })?;

    parse_store(&content)
}

/// Parse a policy store snapshot from a TOML string
pub fn parse_store(toml_content: &str) -> StoreResult<MemoryStore> {
    let table: toml::Table = toml::from_str(toml_content)?;
    let mut store = MemoryStore::new();

    for (name, value) in table {
        match value {
            Value::Table(children) => {
                store.create_sub_key(name.as_str());
                for (child, child_value) in children {
                    store.set_sub_value(name.as_str(), child, to_store_value(child_value));
                }
            }
            other => store.set_value(name, to_store_value(other)),
        }
    }

    tracing::debug!(empty = store.is_empty(), "Loaded policy store");
    Ok(store)
}

fn to_store_value(value: Value) -> StoreValue {
    match value {
        Value::Integer(number) => StoreValue::Integer(number),
        Value::String(text) => StoreValue::String(text),
        other => StoreValue::Unsupported(other.type_str()),
    }
}
