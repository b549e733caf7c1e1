//! pkgpolicy-core: administrator policy resolution for the package manager
//!
//! This crate resolves the policies an administrator configured for the
//! package manager client and checks source certificate pins:
//!
//! - **Catalog** - [`PolicyCatalog`] lists every toggle and value policy
//! - **Stores** - [`PolicyStore`] is the read-only policy root, with
//!   [`MemoryStore`] and TOML snapshots via [`load_store_from_file`]
//! - **Sources** - [`SourceFromPolicy`] entries decoded from source list policies
//! - **Pinning** - [`PinningConfiguration`] validates live certificate chains
//! - **Facade** - [`GroupPolicy`] answers typed queries against one root
//!
//! # Quick Start
//!
//! ```no_run
//! use pkgpolicy_core::{
//!     AdditionalSources, GroupPolicy, SourceAutoUpdateIntervalInMinutes, TogglePolicy,
//!     load_store_from_file,
//! };
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let policy = GroupPolicy::new(load_store_from_file("policies.toml")?);
//!
//!     if !policy.is_enabled(TogglePolicy::AdditionalSources) {
//!         println!("additional sources are disabled");
//!     }
//!     if let Some(minutes) = policy.get_value::<SourceAutoUpdateIntervalInMinutes>() {
//!         println!("update every {minutes} minutes");
//!     }
//!     for source in policy.get_value::<AdditionalSources>().unwrap_or_default() {
//!         println!("{} -> {}", source.name, source.arg);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod group_policy;
pub mod pinning;
pub mod reader;
pub mod sources;
pub mod store;

pub use catalog::{
    PolicyCatalog, PolicyState, TogglePolicy, TogglePolicyDescriptor, ValueKind,
    ValuePolicyDescriptor, ValuePolicyId,
};
pub use error::{CertificateError, PinningError, SourceDecodeError, StoreError, StoreResult};
pub use group_policy::{
    AdditionalSources, AllowedSources, DefaultProxy, GroupPolicy, SourceAutoUpdateIntervalInMinutes,
    ValuePolicy,
};
pub use pinning::{
    Certificate, CertificateInfo, CertificateParser, PinningChain, PinningConfiguration,
    PinningDetails, ValidationMode, X509CertificateParser,
};
pub use reader::{PolicyReader, PolicyValue};
pub use sources::{SourceFromPolicy, SourceTrustLevel};
pub use store::{MemoryStore, PolicyStore, StoreValue, load_store_from_file, parse_store};
