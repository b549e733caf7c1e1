mod loader;

pub use loader::{StoreLocator, load_policy};
