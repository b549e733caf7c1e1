//! Policy catalog
//!
//! Static description of every toggle and value policy the client knows
//! about. The tables are built at compile time and never change.

use std::fmt;

use serde::Serialize;

/// Resolved state of a toggle policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PolicyState {
    /// No usable value in the store
    NotConfigured,
    /// Explicitly turned on (stored as 1)
    Enabled,
    /// Explicitly turned off (stored as 0)
    Disabled,
}

impl PolicyState {
    /// Classify a raw integer toggle value
    pub fn from_toggle_value(value: i64) -> Self {
        match value {
            1 => Self::Enabled,
            0 => Self::Disabled,
            _ => Self::NotConfigured,
        }
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotConfigured => "not_configured",
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }
}

impl fmt::Display for PolicyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a toggle policy
///
/// `None` is a sentinel for "no policy applies". It is never registered in
/// the catalog and always resolves to [`PolicyState::NotConfigured`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TogglePolicy {
    /// No policy applies
    None,
    /// The package manager as a whole
    PackageManager,
    /// Opening and editing user settings
    Settings,
    /// Experimental features
    ExperimentalFeatures,
    /// Installing from local manifest files
    LocalManifestFiles,
    /// Overriding installer hash mismatches
    HashOverride,
    /// Skipping the malware scan of local archives
    LocalArchiveMalwareScanOverride,
    /// The default community source
    DefaultSource,
    /// The store source
    StoreSource,
    /// Sources added by policy
    AdditionalSources,
    /// Restricting user sources to an allow list
    AllowedSources,
    /// Bypassing certificate pinning for the store source
    BypassCertificatePinningForStore,
    /// The command line interfaces
    CommandLineInterfaces,
    /// Configuration files
    Configuration,
    /// Proxy options on the command line
    ProxyCommandLineOptions,
    /// The MCP server
    McpServer,
}

impl TogglePolicy {
    /// Catalog entry for this policy, `None` for the sentinel
    pub fn descriptor(self) -> Option<&'static TogglePolicyDescriptor> {
        TOGGLE_POLICIES.iter().find(|descriptor| descriptor.policy == self)
    }
}

/// Catalog entry for a toggle policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TogglePolicyDescriptor {
    /// Policy this entry describes
    pub policy: TogglePolicy,
    /// Value name read from the policy store
    pub key_name: &'static str,
    /// Human readable policy name
    pub display_name: &'static str,
}

/// Store-native shape of a value policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueKind {
    /// Integer value, exposed as `u32`
    Integer,
    /// String value
    String,
    /// Sub-key whose children are JSON source entries
    SourceList,
}

/// Identity of a value policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValuePolicyId {
    /// Minutes between automatic source updates
    SourceAutoUpdateIntervalInMinutes,
    /// Sources added on top of the user's own
    AdditionalSources,
    /// The only sources users may add
    AllowedSources,
    /// Proxy used for all network traffic
    DefaultProxy,
}

impl ValuePolicyId {
    /// Catalog entry for this policy
    pub fn descriptor(self) -> &'static ValuePolicyDescriptor {
        match self {
            Self::SourceAutoUpdateIntervalInMinutes => &SOURCE_AUTO_UPDATE_INTERVAL,
            Self::AdditionalSources => &ADDITIONAL_SOURCES,
            Self::AllowedSources => &ALLOWED_SOURCES,
            Self::DefaultProxy => &DEFAULT_PROXY,
        }
    }
}

/// Catalog entry for a value policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValuePolicyDescriptor {
    /// Policy this entry describes
    pub id: ValuePolicyId,
    /// Current value (or sub-key) name
    pub key_name: &'static str,
    /// Name used by older policy templates, read only when `key_name` is absent
    pub legacy_key_name: Option<&'static str>,
    /// Shape the value is read as
    pub kind: ValueKind,
}

/// Read-only access to the policy tables
pub struct PolicyCatalog;

impl PolicyCatalog {
    /// Every registered toggle policy, in catalog order
    ///
    /// The iterator is lazy and cheap to clone, so callers can walk the
    /// policy surface as many times as they need.
    pub fn all_policies() -> impl Iterator<Item = &'static TogglePolicyDescriptor> + Clone {
        TOGGLE_POLICIES.iter()
    }

    /// Every registered value policy, in catalog order
    pub fn value_policies() -> impl Iterator<Item = &'static ValuePolicyDescriptor> + Clone {
        VALUE_POLICIES.iter().copied()
    }
}

const fn toggle(
    policy: TogglePolicy,
    key_name: &'static str,
    display_name: &'static str,
) -> TogglePolicyDescriptor {
    TogglePolicyDescriptor {
        policy,
        key_name,
        display_name,
    }
}

static TOGGLE_POLICIES: [TogglePolicyDescriptor; 15] = [
    toggle(
        TogglePolicy::PackageManager,
        "EnableAppInstaller",
        "Enable Package Manager",
    ),
    toggle(
        TogglePolicy::Settings,
        "EnableSettings",
        "Enable Package Manager Settings",
    ),
    toggle(
        TogglePolicy::ExperimentalFeatures,
        "EnableExperimentalFeatures",
        "Enable Package Manager Experimental Features",
    ),
    toggle(
        TogglePolicy::LocalManifestFiles,
        "EnableLocalManifestFiles",
        "Enable Package Manager Local Manifest Files",
    ),
    toggle(
        TogglePolicy::HashOverride,
        "EnableHashOverride",
        "Enable Package Manager Hash Override",
    ),
    toggle(
        TogglePolicy::LocalArchiveMalwareScanOverride,
        "EnableLocalArchiveMalwareScanOverride",
        "Enable Package Manager Local Archive Malware Scan Override",
    ),
    toggle(
        TogglePolicy::DefaultSource,
        "EnableDefaultSource",
        "Enable Package Manager Default Source",
    ),
    toggle(
        TogglePolicy::StoreSource,
        "EnableMicrosoftStoreSource",
        "Enable Package Manager Store Source",
    ),
    toggle(
        TogglePolicy::AdditionalSources,
        "EnableAdditionalSources",
        "Enable Additional Package Manager Sources",
    ),
    toggle(
        TogglePolicy::AllowedSources,
        "EnableAllowedSources",
        "Enable Allowed Package Manager Sources",
    ),
    toggle(
        TogglePolicy::BypassCertificatePinningForStore,
        "EnableBypassCertificatePinningForMicrosoftStore",
        "Enable Certificate Pinning Bypass for Store Source",
    ),
    toggle(
        TogglePolicy::CommandLineInterfaces,
        "EnableWindowsPackageManagerCommandLineInterfaces",
        "Enable Package Manager Command Line Interfaces",
    ),
    toggle(
        TogglePolicy::Configuration,
        "EnableWindowsPackageManagerConfiguration",
        "Enable Package Manager Configuration",
    ),
    toggle(
        TogglePolicy::ProxyCommandLineOptions,
        "EnableWindowsPackageManagerProxyCommandLineOptions",
        "Enable Package Manager Proxy Command Line Options",
    ),
    toggle(
        TogglePolicy::McpServer,
        "EnableWindowsPackageManagerMcpServer",
        "Enable Package Manager MCP Server",
    ),
];

static SOURCE_AUTO_UPDATE_INTERVAL: ValuePolicyDescriptor = ValuePolicyDescriptor {
    id: ValuePolicyId::SourceAutoUpdateIntervalInMinutes,
    key_name: "SourceAutoUpdateInterval",
    legacy_key_name: Some("SourceAutoUpdateIntervalInMinutes"),
    kind: ValueKind::Integer,
};

static ADDITIONAL_SOURCES: ValuePolicyDescriptor = ValuePolicyDescriptor {
    id: ValuePolicyId::AdditionalSources,
    key_name: "AdditionalSources",
    legacy_key_name: None,
    kind: ValueKind::SourceList,
};

static ALLOWED_SOURCES: ValuePolicyDescriptor = ValuePolicyDescriptor {
    id: ValuePolicyId::AllowedSources,
    key_name: "AllowedSources",
    legacy_key_name: None,
    kind: ValueKind::SourceList,
};

static DEFAULT_PROXY: ValuePolicyDescriptor = ValuePolicyDescriptor {
    id: ValuePolicyId::DefaultProxy,
    key_name: "DefaultProxy",
    legacy_key_name: None,
    kind: ValueKind::String,
};

static VALUE_POLICIES: [&ValuePolicyDescriptor; 4] = [
    &SOURCE_AUTO_UPDATE_INTERVAL,
    &ADDITIONAL_SOURCES,
    &ALLOWED_SOURCES,
    &DEFAULT_PROXY,
];
