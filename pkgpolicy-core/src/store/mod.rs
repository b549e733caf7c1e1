//! Policy store access
//!
//! The store is the read-only key-value collaborator policies are resolved
//! from. [`MemoryStore`] backs tests and embedding hosts; [`load_store_from_file`]
//! builds one from a TOML policy export.

mod file;
mod memory;
mod traits;

pub use file::{load_store_from_file, parse_store};
pub use memory::{MemoryStore, StoreValue};
pub use traits::PolicyStore;
