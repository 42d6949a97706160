//! Policy definitions: toggle and value policies and the static tables that
//! map each of them onto backend value names.

/// Resolved state of a toggle policy. Always computed from the backend at
/// read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyState {
    NotConfigured,
    Enabled,
    Disabled,
}

/// Boolean-gated features an administrator can switch on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TogglePolicy {
    /// Vacuous policy: always not configured, therefore always enabled.
    None,
    PackageManager,
    Settings,
    ExperimentalFeatures,
    LocalManifestFiles,
    HashOverride,
    LocalArchiveMalwareScanOverride,
    DefaultSource,
    StoreSource,
    AdditionalSources,
    AllowedSources,
    BypassCertificatePinningForStore,
    CommandLineInterfaces,
    Configuration,
    ProxyCommandLineOptions,
    McpServer,
}

/// Registry entry for a toggle policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TogglePolicyInfo {
    pub policy: TogglePolicy,
    /// Backend value name holding the integer toggle.
    pub value_name: &'static str,
    /// Name shown to users when the policy blocks something.
    pub display_name: &'static str,
}

const fn toggle(
    policy: TogglePolicy,
    value_name: &'static str,
    display_name: &'static str,
) -> TogglePolicyInfo {
    TogglePolicyInfo { policy, value_name, display_name }
}

/// Every non-sentinel toggle policy, in declaration order.
pub const TOGGLE_POLICIES: &[TogglePolicyInfo] = &[
    toggle(TogglePolicy::PackageManager, "EnablePackageManager", "Enable Package Manager"),
    toggle(TogglePolicy::Settings, "EnablePackageManagerSettings", "Enable Package Manager Settings"),
    toggle(TogglePolicy::ExperimentalFeatures, "EnableExperimentalFeatures", "Enable Package Manager Experimental Features"),
    toggle(TogglePolicy::LocalManifestFiles, "EnableLocalManifestFiles", "Enable Package Manager Local Manifest Files"),
    toggle(TogglePolicy::HashOverride, "EnableHashOverride", "Enable Package Manager Hash Override"),
    toggle(TogglePolicy::LocalArchiveMalwareScanOverride, "EnableLocalArchiveMalwareScanOverride", "Enable Package Manager Local Archive Malware Scan Override"),
    toggle(TogglePolicy::DefaultSource, "EnableDefaultSource", "Enable Package Manager Default Source"),
    toggle(TogglePolicy::StoreSource, "EnableStoreSource", "Enable Package Manager Store Source"),
    toggle(TogglePolicy::AdditionalSources, "EnableAdditionalSources", "Enable Package Manager Additional Sources"),
    toggle(TogglePolicy::AllowedSources, "EnableAllowedSources", "Enable Package Manager Allowed Sources"),
    toggle(TogglePolicy::BypassCertificatePinningForStore, "EnableBypassCertificatePinningForStore", "Enable Store Source Certificate Pinning Bypass"),
    toggle(TogglePolicy::CommandLineInterfaces, "EnablePackageManagerCommandLineInterfaces", "Enable Package Manager Command Line Interfaces"),
    toggle(TogglePolicy::Configuration, "EnablePackageManagerConfiguration", "Enable Package Manager Configuration"),
    toggle(TogglePolicy::ProxyCommandLineOptions, "EnablePackageManagerProxyCommandLineOptions", "Enable Package Manager Proxy Command Line Options"),
    toggle(TogglePolicy::McpServer, "EnablePackageManagerMcpServer", "Enable Package Manager MCP Server"),
];

impl TogglePolicy {
    /// All registered toggle policies, excluding the `None` sentinel.
    pub fn all() -> &'static [TogglePolicyInfo] {
        TOGGLE_POLICIES
    }

    /// Registry entry for this policy. `None` has no entry.
    pub fn info(self) -> Option<&'static TogglePolicyInfo> {
        TOGGLE_POLICIES.iter().find(|info| info.policy == self)
    }

    pub fn value_name(self) -> Option<&'static str> {
        self.info().map(|info| info.value_name)
    }

    pub fn display_name(self) -> &'static str {
        self.info().map(|info| info.display_name).unwrap_or("None")
    }
}

/// Identifies a typed, non-boolean policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValuePolicyId {
    SourceAutoUpdateIntervalInMinutes,
    AdditionalSources,
    AllowedSources,
    DefaultProxy,
}

/// Registry entry for a value policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValuePolicyInfo {
    pub policy: ValuePolicyId,
    /// Current backend key.
    pub key_name: &'static str,
    /// Older key still honored when the current key is absent.
    pub deprecated_key_name: Option<&'static str>,
}

pub const VALUE_POLICIES: &[ValuePolicyInfo] = &[
    ValuePolicyInfo {
        policy: ValuePolicyId::SourceAutoUpdateIntervalInMinutes,
        key_name: "SourceAutoUpdateInterval",
        deprecated_key_name: Some("SourceAutoUpdateIntervalInMinutes"),
    },
    ValuePolicyInfo {
        policy: ValuePolicyId::AdditionalSources,
        key_name: "AdditionalSources",
        deprecated_key_name: None,
    },
    ValuePolicyInfo {
        policy: ValuePolicyId::AllowedSources,
        key_name: "AllowedSources",
        deprecated_key_name: None,
    },
    ValuePolicyInfo {
        policy: ValuePolicyId::DefaultProxy,
        key_name: "DefaultProxy",
        deprecated_key_name: None,
    },
];

impl ValuePolicyId {
    pub fn all() -> &'static [ValuePolicyInfo] {
        VALUE_POLICIES
    }

    pub fn info(self) -> &'static ValuePolicyInfo {
        // Every variant has exactly one row; the table is matched in order.
        match self {
            ValuePolicyId::SourceAutoUpdateIntervalInMinutes => &VALUE_POLICIES[0],
            ValuePolicyId::AdditionalSources => &VALUE_POLICIES[1],
            ValuePolicyId::AllowedSources => &VALUE_POLICIES[2],
            ValuePolicyId::DefaultProxy => &VALUE_POLICIES[3],
        }
    }

    pub fn key_name(self) -> &'static str {
        self.info().key_name
    }

    pub fn deprecated_key_name(self) -> Option<&'static str> {
        self.info().deprecated_key_name
    }
}
