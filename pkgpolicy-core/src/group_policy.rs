//! Group policy facade
//!
//! [`GroupPolicy`] binds to one policy root and answers typed queries. It
//! holds no cached state: every query goes back to the store.

use std::sync::Arc;

use crate::catalog::{PolicyState, TogglePolicy, ValuePolicyId};
use crate::pinning::{CertificateParser, X509CertificateParser};
use crate::reader::{PolicyReader, PolicyValue};
use crate::sources::SourceFromPolicy;
use crate::store::PolicyStore;

/// A value policy with a statically known result type
pub trait ValuePolicy {
    type Value;

    const ID: ValuePolicyId;

    fn read(reader: &PolicyReader<'_>) -> Option<Self::Value>;
}

/// Minutes between automatic source updates
pub struct SourceAutoUpdateIntervalInMinutes;

impl ValuePolicy for SourceAutoUpdateIntervalInMinutes {
    type Value = u32;

    const ID: ValuePolicyId = ValuePolicyId::SourceAutoUpdateIntervalInMinutes;

    fn read(reader: &PolicyReader<'_>) -> Option<u32> {
        reader.read_u32(Self::ID.descriptor())
    }
}

/// Sources to add on top of the user's own
pub struct AdditionalSources;

impl ValuePolicy for AdditionalSources {
    type Value = Vec<SourceFromPolicy>;

    const ID: ValuePolicyId = ValuePolicyId::AdditionalSources;

    fn read(reader: &PolicyReader<'_>) -> Option<Self::Value> {
        reader.read_source_list(Self::ID.descriptor())
    }
}

/// The only sources users may add
pub struct AllowedSources;

impl ValuePolicy for AllowedSources {
    type Value = Vec<SourceFromPolicy>;

    const ID: ValuePolicyId = ValuePolicyId::AllowedSources;

    fn read(reader: &PolicyReader<'_>) -> Option<Self::Value> {
        reader.read_source_list(Self::ID.descriptor())
    }
}

/// Proxy used for all network traffic
pub struct DefaultProxy;

impl ValuePolicy for DefaultProxy {
    type Value = String;

    const ID: ValuePolicyId = ValuePolicyId::DefaultProxy;

    fn read(reader: &PolicyReader<'_>) -> Option<String> {
        reader.read_string(Self::ID.descriptor())
    }
}

/// Resolved view of the policies under one store root
pub struct GroupPolicy<S> {
    store: S,
    parser: Arc<dyn CertificateParser>,
}

impl<S: PolicyStore> GroupPolicy<S> {
    /// Bind to a policy root, decoding pinned certificates as DER X.509
    pub fn new(store: S) -> Self {
        Self {
            store,
            parser: Arc::new(X509CertificateParser),
        }
    }

    /// Use a host-provided certificate parser for embedded pin certificates
    pub fn with_certificate_parser(mut self, parser: Arc<dyn CertificateParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Parser used for pinned and live certificates
    pub fn certificate_parser(&self) -> &dyn CertificateParser {
        self.parser.as_ref()
    }

    fn reader(&self) -> PolicyReader<'_> {
        PolicyReader::new(&self.store, self.parser.as_ref())
    }

    /// Resolve a value policy, `None` when it is not configured
    pub fn get_value<P: ValuePolicy>(&self) -> Option<P::Value> {
        P::read(&self.reader())
    }

    /// Resolve a value policy by id, as its untyped value
    pub fn value_of(&self, id: ValuePolicyId) -> Option<PolicyValue> {
        self.reader().read_value(id.descriptor())
    }

    pub fn get_state(&self, policy: TogglePolicy) -> PolicyState {
        match policy.descriptor() {
            Some(descriptor) => self.reader().read_state(descriptor),
            None => PolicyState::NotConfigured,
        }
    }

    /// Whether policy allows the feature; only an explicit disable blocks it
    pub fn is_enabled(&self, policy: TogglePolicy) -> bool {
        self.get_state(policy) != PolicyState::Disabled
    }
}
