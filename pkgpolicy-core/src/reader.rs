//! Typed policy value reads
//!
//! Every value policy goes through [`PolicyReader::locate`]: the current key
//! wins whenever it exists, even if its value has the wrong type. The legacy
//! key is only consulted when the current key is missing entirely, so a newer
//! (possibly broken) setting always shadows a stale legacy one.

use serde::Serialize;

use crate::catalog::{PolicyState, TogglePolicyDescriptor, ValueKind, ValuePolicyDescriptor};
use crate::pinning::CertificateParser;
use crate::sources::{self, SourceFromPolicy};
use crate::store::PolicyStore;

/// A resolved value of any kind, for callers that walk the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PolicyValue {
    Integer(i64),
    String(String),
    Sources(Vec<SourceFromPolicy>),
}

/// Reads policy values from one store
pub struct PolicyReader<'a> {
    store: &'a dyn PolicyStore,
    parser: &'a dyn CertificateParser,
}

impl<'a> PolicyReader<'a> {
    pub fn new(store: &'a dyn PolicyStore, parser: &'a dyn CertificateParser) -> Self {
        Self { store, parser }
    }

    /// Name of the value to read for `descriptor`, if any is present
    fn locate(&self, descriptor: &ValuePolicyDescriptor) -> Option<&'static str> {
        if self.store.has_value(descriptor.key_name) {
            return Some(descriptor.key_name);
        }

        descriptor
            .legacy_key_name
            .filter(|legacy| self.store.has_value(legacy))
    }

    /// Read an integer value policy
    pub fn read_integer(&self, descriptor: &ValuePolicyDescriptor) -> Option<i64> {
        let name = self.locate(descriptor)?;
        let value = self.store.read_integer(name);
        if value.is_none() {
            tracing::debug!(policy = name, "Policy value is not an integer");
        }
        value
    }

    /// Read an integer value policy that must fit in a `u32`
    ///
    /// An out-of-range value is a type mismatch on the name that was found,
    /// so it reads as no value and does not fall back.
    pub fn read_u32(&self, descriptor: &ValuePolicyDescriptor) -> Option<u32> {
        let value = self.read_integer(descriptor)?;
        let narrowed = u32::try_from(value).ok();
        if narrowed.is_none() {
            tracing::debug!(policy = descriptor.key_name, value, "Policy value is out of range");
        }
        narrowed
    }

    /// Read a string value policy
    pub fn read_string(&self, descriptor: &ValuePolicyDescriptor) -> Option<String> {
        let name = self.locate(descriptor)?;
        let value = self.store.read_string(name);
        if value.is_none() {
            tracing::debug!(policy = name, "Policy value is not a string");
        }
        value
    }

    /// Read a source list value policy
    pub fn read_source_list(
        &self,
        descriptor: &ValuePolicyDescriptor,
    ) -> Option<Vec<SourceFromPolicy>> {
        sources::read_source_list(self.store, self.parser, descriptor.key_name)
    }

    /// Read any value policy according to its declared kind
    pub fn read_value(&self, descriptor: &ValuePolicyDescriptor) -> Option<PolicyValue> {
        match descriptor.kind {
            ValueKind::Integer => self
                .read_u32(descriptor)
                .map(|value| PolicyValue::Integer(value.into())),
            ValueKind::String => self.read_string(descriptor).map(PolicyValue::String),
            ValueKind::SourceList => self.read_source_list(descriptor).map(PolicyValue::Sources),
        }
    }

    /// Classify a toggle policy
    pub fn read_state(&self, descriptor: &TogglePolicyDescriptor) -> PolicyState {
        self.store
            .read_integer(descriptor.key_name)
            .map_or(PolicyState::NotConfigured, PolicyState::from_toggle_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{TogglePolicy, ValuePolicyId};
    use crate::pinning::X509CertificateParser;
    use crate::store::{MemoryStore, StoreValue};

    fn interval() -> &'static ValuePolicyDescriptor {
        ValuePolicyId::SourceAutoUpdateIntervalInMinutes.descriptor()
    }

    fn read_interval(store: &MemoryStore) -> Option<i64> {
        PolicyReader::new(store, &X509CertificateParser).read_integer(interval())
    }

    #[test]
    fn test_current_name_is_read() {
        let mut store = MemoryStore::new();
        store.set_integer("SourceAutoUpdateInterval", 5);
        assert_eq!(read_interval(&store), Some(5));
    }

    #[test]
    fn test_current_name_shadows_legacy() {
        let mut store = MemoryStore::new();
        store.set_integer("SourceAutoUpdateInterval", 1);
        store.set_integer("SourceAutoUpdateIntervalInMinutes", 3);
        assert_eq!(read_interval(&store), Some(1));

        store.set_string("SourceAutoUpdateIntervalInMinutes", "Invalid type");
        assert_eq!(read_interval(&store), Some(1));
    }

    #[test]
    fn test_wrong_type_blocks_fallback() {
        let mut store = MemoryStore::new();
        store.set_string("SourceAutoUpdateInterval", "Wrong type");
        store.set_integer("SourceAutoUpdateIntervalInMinutes", 20);
        assert_eq!(read_interval(&store), None);

        store.set_value("SourceAutoUpdateInterval", StoreValue::Unsupported("boolean"));
        assert_eq!(read_interval(&store), None);
    }

    #[test]
    fn test_missing_current_falls_back_to_legacy() {
        let mut store = MemoryStore::new();
        store.set_integer("SourceAutoUpdateIntervalInMinutes", 20);
        assert_eq!(read_interval(&store), Some(20));
    }

    #[test]
    fn test_legacy_wrong_type_is_no_value() {
        let mut store = MemoryStore::new();
        store.set_string("SourceAutoUpdateIntervalInMinutes", "twenty");
        assert_eq!(read_interval(&store), None);
    }

    #[test]
    fn test_absent_everywhere_is_no_value() {
        assert_eq!(read_interval(&MemoryStore::new()), None);
    }

    #[test]
    fn test_out_of_range_is_no_value_on_every_path() {
        let mut store = MemoryStore::new();
        store.set_integer("SourceAutoUpdateInterval", -5);
        store.set_integer("SourceAutoUpdateIntervalInMinutes", 20);
        let reader = PolicyReader::new(&store, &X509CertificateParser);

        assert_eq!(reader.read_integer(interval()), Some(-5));
        assert_eq!(reader.read_u32(interval()), None);
        assert_eq!(reader.read_value(interval()), None);

        store.set_integer("SourceAutoUpdateInterval", i64::from(u32::MAX) + 1);
        let reader = PolicyReader::new(&store, &X509CertificateParser);
        assert_eq!(reader.read_value(interval()), None);
    }

    #[test]
    fn test_read_string_without_legacy() {
        let mut store = MemoryStore::new();
        let reader = PolicyReader::new(&store, &X509CertificateParser);
        assert_eq!(reader.read_string(ValuePolicyId::DefaultProxy.descriptor()), None);

        store.set_string("DefaultProxy", "http://proxy:3128");
        let reader = PolicyReader::new(&store, &X509CertificateParser);
        assert_eq!(
            reader.read_string(ValuePolicyId::DefaultProxy.descriptor()).as_deref(),
            Some("http://proxy:3128")
        );
    }

    #[test]
    fn test_read_value_dispatches_on_kind() {
        let mut store = MemoryStore::new();
        store.set_integer("SourceAutoUpdateInterval", 15);
        store.create_sub_key("AllowedSources");
        let reader = PolicyReader::new(&store, &X509CertificateParser);

        assert_eq!(reader.read_value(interval()), Some(PolicyValue::Integer(15)));
        assert_eq!(
            reader.read_value(ValuePolicyId::AllowedSources.descriptor()),
            Some(PolicyValue::Sources(vec![]))
        );
        assert_eq!(reader.read_value(ValuePolicyId::AdditionalSources.descriptor()), None);
    }

    #[test]
    fn test_read_state() {
        let mut store = MemoryStore::new();
        store.set_integer("EnableAppInstaller", 1);
        store.set_integer("EnableLocalManifestFiles", 0);
        store.set_string("EnableExperimentalFeatures", "Wrong");
        store.set_integer("EnableHashOverride", 2);
        let reader = PolicyReader::new(&store, &X509CertificateParser);

        let state = |policy: TogglePolicy| {
            policy
                .descriptor()
                .map_or(PolicyState::NotConfigured, |d| reader.read_state(d))
        };
        assert_eq!(state(TogglePolicy::PackageManager), PolicyState::Enabled);
        assert_eq!(state(TogglePolicy::LocalManifestFiles), PolicyState::Disabled);
        assert_eq!(state(TogglePolicy::ExperimentalFeatures), PolicyState::NotConfigured);
        assert_eq!(state(TogglePolicy::HashOverride), PolicyState::NotConfigured);
        assert_eq!(state(TogglePolicy::DefaultSource), PolicyState::NotConfigured);
    }
}
