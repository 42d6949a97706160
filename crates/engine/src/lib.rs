// crates/engine/src/lib.rs

//! Public facade for the package-manager policy engine.
//! Exposes a stable API and re-exports types for consumers (client, FFI).

pub mod adapters;
#[cfg(feature = "openssl")]
pub mod crypto;
pub mod domain;

#[cfg(feature = "json_store")]
use domain::error::PolicyResult;

/// Open the policy store named by the default locator environment variable
/// (`PKGPOLICY_STORE`). Returns `None` when the variable is not set.
#[cfg(feature = "json_store")]
pub fn open_default_policies() -> PolicyResult<Option<GroupPolicy<JsonPolicyStore>>> {
    match StoreLocator::from_default_env()? {
        Some(locator) => Ok(Some(GroupPolicy::new(locator.resolve()?))),
        None => Ok(None),
    }
}

/// Open the policy store at `locator` (`file:<path>` or `env:<VAR>`).
#[cfg(feature = "json_store")]
pub fn open_policies(locator: &str) -> PolicyResult<GroupPolicy<JsonPolicyStore>> {
    let locator: StoreLocator = locator.parse()?;
    Ok(GroupPolicy::new(locator.resolve()?))
}

// Re-exports for convenience
pub use adapters::MemoryPolicyStore;
#[cfg(feature = "json_store")]
pub use adapters::{JsonPolicyStore, LocatorError, StoreLocator};
#[cfg(feature = "openssl")]
pub use crypto::chain::CertificatePool;
pub use domain::error::PolicyError;
pub use domain::group_policy::{
    AdditionalSources, AllowedSources, DefaultProxy, GroupPolicy, SourceAutoUpdateIntervalInMinutes, ValuePolicy,
};
pub use domain::policy::{PolicyState, TogglePolicy, TogglePolicyInfo, ValuePolicyId, ValuePolicyInfo};
pub use domain::store::PolicyStore;
pub use domain::types::{
    Lookup, PinningCertificateDetail, PinningChain, PinningConfiguration, PolicyDefaults, SourceFromPolicy,
    ValidationMode,
};
