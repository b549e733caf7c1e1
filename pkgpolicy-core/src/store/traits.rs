//! Store trait consumed by the policy readers

use std::sync::Arc;

/// Read-only typed access to one policy root
///
/// Lookups never fail: a value that is missing or has a different native
/// type reads as `None`. `has_value` reports presence regardless of type.
pub trait PolicyStore: Send + Sync {
    /// Whether a value with this name exists, whatever its type
    fn has_value(&self, name: &str) -> bool;

    /// Read an integer value
    fn read_integer(&self, name: &str) -> Option<i64>;

    /// Read a string value
    fn read_string(&self, name: &str) -> Option<String>;

    /// String payloads stored under a sub-key, in store order
    ///
    /// `None` when the sub-key does not exist, an empty list when it exists
    /// without string children.
    fn sub_values(&self, key: &str) -> Option<Vec<String>>;
}

impl<T: PolicyStore + ?Sized> PolicyStore for &T {
    fn has_value(&self, name: &str) -> bool {
        (**self).has_value(name)
    }

    fn read_integer(&self, name: &str) -> Option<i64> {
        (**self).read_integer(name)
    }

    fn read_string(&self, name: &str) -> Option<String> {
        (**self).read_string(name)
    }

    fn sub_values(&self, key: &str) -> Option<Vec<String>> {
        (**self).sub_values(key)
    }
}

impl<T: PolicyStore + ?Sized> PolicyStore for Arc<T> {
    fn has_value(&self, name: &str) -> bool {
        (**self).has_value(name)
    }

    fn read_integer(&self, name: &str) -> Option<i64> {
        (**self).read_integer(name)
    }

    fn read_string(&self, name: &str) -> Option<String> {
        (**self).read_string(name)
    }

    fn sub_values(&self, key: &str) -> Option<Vec<String>> {
        (**self).sub_values(key)
    }
}
