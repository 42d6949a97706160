//! Policy resolution engine.
//!
//! `GroupPolicy` is bound to a [`PolicyStore`] and holds no state of its
//! own; every query re-reads the backend, so external edits are observed
//! without any invalidation.

use tracing::{debug, trace};

use super::error::{PolicyError, PolicyResult};
use super::policy::{PolicyState, TogglePolicy, ValuePolicyId};
use super::store::PolicyStore;
use super::types::{Lookup, SourceFromPolicy};

/// A typed, non-boolean policy. Implemented by the marker types below and
/// used as `group_policy.get_value::<AdditionalSources>()`.
pub trait ValuePolicy {
    type Value;

    const ID: ValuePolicyId;

    /// Resolve the value from the store. `None` means not configured.
    fn resolve<S: PolicyStore + ?Sized>(store: &S) -> Option<Self::Value>;
}

/// Minutes between automatic source updates.
#[derive(Debug, Clone, Copy)]
pub struct SourceAutoUpdateIntervalInMinutes;

/// Sources added on top of the defaults.
#[derive(Debug, Clone, Copy)]
pub struct AdditionalSources;

/// Sources users are allowed to add themselves.
#[derive(Debug, Clone, Copy)]
pub struct AllowedSources;

/// Proxy used for all network traffic unless overridden.
#[derive(Debug, Clone, Copy)]
pub struct DefaultProxy;

impl ValuePolicy for SourceAutoUpdateIntervalInMinutes {
    type Value = u32;
    const ID: ValuePolicyId = ValuePolicyId::SourceAutoUpdateIntervalInMinutes;

    fn resolve<S: PolicyStore + ?Sized>(store: &S) -> Option<u32> {
        read_integer_with_fallback(store, Self::ID)
    }
}

impl ValuePolicy for AdditionalSources {
    type Value = Vec<SourceFromPolicy>;
    const ID: ValuePolicyId = ValuePolicyId::AdditionalSources;

    fn resolve<S: PolicyStore + ?Sized>(store: &S) -> Option<Self::Value> {
        read_source_list(store, Self::ID)
    }
}

impl ValuePolicy for AllowedSources {
    type Value = Vec<SourceFromPolicy>;
    const ID: ValuePolicyId = ValuePolicyId::AllowedSources;

    fn resolve<S: PolicyStore + ?Sized>(store: &S) -> Option<Self::Value> {
        read_source_list(store, Self::ID)
    }
}

impl ValuePolicy for DefaultProxy {
    type Value = String;
    const ID: ValuePolicyId = ValuePolicyId::DefaultProxy;

    fn resolve<S: PolicyStore + ?Sized>(store: &S) -> Option<String> {
        let key = Self::ID.key_name();
        match store.read_string(key) {
            Lookup::Present(v) => Some(v),
            Lookup::WrongType => {
                debug!(key, "policy value has the wrong type; treating as not configured");
                None
            }
            Lookup::Absent => None,
        }
    }
}

/// The current key always wins when it exists, even if mistyped; the
/// deprecated key is only read when the current one is absent.
fn read_integer_with_fallback<S: PolicyStore + ?Sized>(store: &S, id: ValuePolicyId) -> Option<u32> {
    let key = id.key_name();
    match store.read_integer(key) {
        Lookup::Present(v) => {
            trace!(key, value = v, "read integer policy");
            Some(v)
        }
        Lookup::WrongType => {
            debug!(key, "policy value has the wrong type; treating as not configured");
            None
        }
        Lookup::Absent => {
            let old_key = id.deprecated_key_name()?;
            match store.read_integer(old_key) {
                Lookup::Present(v) => {
                    debug!(key, old_key, value = v, "using deprecated policy key");
                    Some(v)
                }
                Lookup::WrongType => {
                    debug!(key = old_key, "policy value has the wrong type; treating as not configured");
                    None
                }
                Lookup::Absent => None,
            }
        }
    }
}

/// Parse every child of a list key, dropping the entries that do not parse.
/// The result is `None` only when the key itself is missing.
fn read_source_list<S: PolicyStore + ?Sized>(store: &S, id: ValuePolicyId) -> Option<Vec<SourceFromPolicy>> {
    let key = id.key_name();
    let entries = store.enumerate_children(key)?;

    let sources = entries.into_iter().fold(Vec::new(), |mut sources, (name, text)| {
        match SourceFromPolicy::from_json_str(&text) {
            Ok(source) => sources.push(source),
            Err(e) => debug!(key, entry = %name, error = %e, "skipping invalid source entry"),
        }
        sources
    });

    trace!(key, count = sources.len(), "read source list policy");
    Some(sources)
}

/// Resolves administrator policies against a store.
#[derive(Debug, Clone)]
pub struct GroupPolicy<S> {
    store: S,
}

impl<S: PolicyStore> GroupPolicy<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// State of a toggle policy. A mistyped value reads as not configured,
    /// never as enabled or disabled.
    pub fn get_state(&self, policy: TogglePolicy) -> PolicyState {
        let Some(name) = policy.value_name() else {
            return PolicyState::NotConfigured;
        };

        match self.store.read_integer(name) {
            Lookup::Present(0) => PolicyState::Disabled,
            Lookup::Present(_) => PolicyState::Enabled,
            Lookup::WrongType => {
                debug!(key = name, "toggle policy has the wrong type; treating as not configured");
                PolicyState::NotConfigured
            }
            Lookup::Absent => PolicyState::NotConfigured,
        }
    }

    /// Only an explicit `Disabled` turns a feature off.
    pub fn is_enabled(&self, policy: TogglePolicy) -> bool {
        self.get_state(policy) != PolicyState::Disabled
    }

    /// `Err(BlockedByPolicy)` when the administrator disabled `policy`.
    pub fn ensure_enabled(&self, policy: TogglePolicy) -> PolicyResult<()> {
        if self.is_enabled(policy) {
            Ok(())
        } else {
            Err(PolicyError::BlockedByPolicy { policy })
        }
    }

    pub fn get_value<P: ValuePolicy>(&self) -> Option<P::Value> {
        P::resolve(&self.store)
    }
}
