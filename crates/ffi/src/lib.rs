use std::sync::Arc;

use pkgpolicy_engine as pe;
use pe::domain::error::PolicyError;
use pe::{GroupPolicy, JsonPolicyStore};

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("{message}")]
    Generic { message: String },
    #[error("{message}")]
    BlockedByPolicy { message: String },
}

impl From<PolicyError> for FfiError {
    fn from(e: PolicyError) -> Self {
        match e {
            PolicyError::BlockedByPolicy { .. } => FfiError::BlockedByPolicy { message: e.to_string() },
            other => FfiError::Generic { message: other.to_string() },
        }
    }
}

// ===== FFI types mirroring the public Rust API (FFI-friendly) =====

#[derive(uniffi::Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiPolicyState { NotConfigured, Enabled, Disabled }

impl From<pe::PolicyState> for FfiPolicyState {
    fn from(v: pe::PolicyState) -> Self {
        match v { pe::PolicyState::NotConfigured => FfiPolicyState::NotConfigured, pe::PolicyState::Enabled => FfiPolicyState::Enabled, pe::PolicyState::Disabled => FfiPolicyState::Disabled }
    }
}

#[derive(uniffi::Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiTogglePolicy {
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

impl From<FfiTogglePolicy> for pe::TogglePolicy {
    fn from(v: FfiTogglePolicy) -> Self {
        use pe::TogglePolicy as T;
        match v {
            FfiTogglePolicy::None => T::None,
            FfiTogglePolicy::PackageManager => T::PackageManager,
            FfiTogglePolicy::Settings => T::Settings,
            FfiTogglePolicy::ExperimentalFeatures => T::ExperimentalFeatures,
            FfiTogglePolicy::LocalManifestFiles => T::LocalManifestFiles,
            FfiTogglePolicy::HashOverride => T::HashOverride,
            FfiTogglePolicy::LocalArchiveMalwareScanOverride => T::LocalArchiveMalwareScanOverride,
            FfiTogglePolicy::DefaultSource => T::DefaultSource,
            FfiTogglePolicy::StoreSource => T::StoreSource,
            FfiTogglePolicy::AdditionalSources => T::AdditionalSources,
            FfiTogglePolicy::AllowedSources => T::AllowedSources,
            FfiTogglePolicy::BypassCertificatePinningForStore => T::BypassCertificatePinningForStore,
            FfiTogglePolicy::CommandLineInterfaces => T::CommandLineInterfaces,
            FfiTogglePolicy::Configuration => T::Configuration,
            FfiTogglePolicy::ProxyCommandLineOptions => T::ProxyCommandLineOptions,
            FfiTogglePolicy::McpServer => T::McpServer,
        }
    }
}

#[derive(uniffi::Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiValidationMode { PublicKey, Subject, Issuer }

impl From<pe::ValidationMode> for FfiValidationMode {
    fn from(v: pe::ValidationMode) -> Self {
        match v { pe::ValidationMode::PublicKey => FfiValidationMode::PublicKey, pe::ValidationMode::Subject => FfiValidationMode::Subject, pe::ValidationMode::Issuer => FfiValidationMode::Issuer }
    }
}

impl From<FfiValidationMode> for pe::ValidationMode {
    fn from(v: FfiValidationMode) -> Self {
        match v { FfiValidationMode::PublicKey => pe::ValidationMode::PublicKey, FfiValidationMode::Subject => pe::ValidationMode::Subject, FfiValidationMode::Issuer => pe::ValidationMode::Issuer }
    }
}

#[derive(uniffi::Record, Debug, Clone, PartialEq, Eq)]
pub struct FfiPinningCertificateDetail {
    pub validation: Vec<FfiValidationMode>,
    pub embedded_certificate: Vec<u8>, // DER
}

/// One pinned chain, root first.
#[derive(uniffi::Record, Debug, Clone, PartialEq, Eq)]
pub struct FfiPinningChain {
    pub details: Vec<FfiPinningCertificateDetail>,
}

#[derive(uniffi::Record, Debug, Clone, PartialEq, Eq)]
pub struct FfiSourceFromPolicy {
    pub name: String,
    pub arg: String,
    pub source_type: String,
    pub data: String,
    pub identifier: String,
    pub trust_level: Vec<String>,
    pub explicit: bool,
    pub pinning_chains: Vec<FfiPinningChain>,
}

impl From<pe::SourceFromPolicy> for FfiSourceFromPolicy {
    fn from(v: pe::SourceFromPolicy) -> Self {
        let pinning_chains = v.pinning_configuration.chains().iter().map(|chain| FfiPinningChain {
            details: chain.details().iter().map(|d| FfiPinningCertificateDetail {
                validation: d.validation().iter().copied().map(Into::into).collect(),
                embedded_certificate: d.embedded_certificate().to_vec(),
            }).collect(),
        }).collect();
        FfiSourceFromPolicy {
            name: v.name,
            arg: v.arg,
            source_type: v.source_type,
            data: v.data,
            identifier: v.identifier,
            trust_level: v.trust_level,
            explicit: v.explicit,
            pinning_chains,
        }
    }
}

impl FfiSourceFromPolicy {
    pub fn pinning_configuration(&self) -> pe::PinningConfiguration {
        pe::PinningConfiguration::new(self.pinning_chains.iter().map(|chain| {
            pe::PinningChain::new(chain.details.iter().map(|d| {
                pe::PinningCertificateDetail::new(d.embedded_certificate.clone(), d.validation.iter().copied().map(Into::into).collect())
            }).collect())
        }).collect())
    }
}

// ===== Policy handle =====

/// Policies resolved from a JSON policy document.
#[derive(uniffi::Object, Debug)]
pub struct FfiGroupPolicy {
    inner: GroupPolicy<JsonPolicyStore>,
}

#[uniffi::export]
impl FfiGroupPolicy {
    /// Open a document by locator: `file:<path>` or `env:<VAR>`.
    #[uniffi::constructor]
    pub fn open(locator: String) -> Result<Arc<Self>, FfiError> {
        let inner = pe::open_policies(&locator)?;
        Ok(Arc::new(Self { inner }))
    }

    #[uniffi::constructor]
    pub fn from_json(document: String) -> Result<Arc<Self>, FfiError> {
        let store = JsonPolicyStore::from_json_str(&document)?;
        Ok(Arc::new(Self { inner: GroupPolicy::new(store) }))
    }

    pub fn get_state(&self, policy: FfiTogglePolicy) -> FfiPolicyState {
        self.inner.get_state(policy.into()).into()
    }

    pub fn is_enabled(&self, policy: FfiTogglePolicy) -> bool {
        self.inner.is_enabled(policy.into())
    }

    pub fn ensure_enabled(&self, policy: FfiTogglePolicy) -> Result<(), FfiError> {
        self.inner.ensure_enabled(policy.into()).map_err(FfiError::from)
    }

    pub fn source_auto_update_interval(&self) -> Option<u32> {
        self.inner.get_value::<pe::SourceAutoUpdateIntervalInMinutes>()
    }

    pub fn default_proxy(&self) -> Option<String> {
        self.inner.get_value::<pe::DefaultProxy>()
    }

    pub fn additional_sources(&self) -> Option<Vec<FfiSourceFromPolicy>> {
        self.inner.get_value::<pe::AdditionalSources>().map(|v| v.into_iter().map(Into::into).collect())
    }

    pub fn allowed_sources(&self) -> Option<Vec<FfiSourceFromPolicy>> {
        self.inner.get_value::<pe::AllowedSources>().map(|v| v.into_iter().map(Into::into).collect())
    }
}

// ===== Pinning =====

/// Validate a leaf certificate (DER) against a source's pinning chains,
/// building the actual chain from `issuers_der`.
#[cfg(feature = "openssl")]
#[uniffi::export]
pub fn validate_source_pinning(source: FfiSourceFromPolicy, leaf_der: Vec<u8>, issuers_der: Vec<Vec<u8>>) -> Result<bool, FfiError> {
    use anyhow::Context;

    let pool = pe::CertificatePool::from_der(&issuers_der)
        .context("Failed to parse issuer certificates")
        .map_err(|e| FfiError::Generic { message: format!("{e:#}") })?;
    source.pinning_configuration().validate_der(&leaf_der, &pool).map_err(FfiError::from)
}

#[cfg(not(feature = "openssl"))]
#[uniffi::export]
pub fn validate_source_pinning(_source: FfiSourceFromPolicy, _leaf_der: Vec<u8>, _issuers_der: Vec<Vec<u8>>) -> Result<bool, FfiError> {
    Err(PolicyError::Feature("openssl").into())
}

uniffi::setup_scaffolding!();
