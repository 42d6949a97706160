// crates/engine/src/domain/store.rs

use std::sync::Arc;

use super::types::Lookup;

/// Read-only backend the engine resolves policies against (registry hive,
/// JSON document, remote config snapshot, ...).
///
/// Implementations must tolerate concurrent reads. Nothing is ever written
/// back through this trait.
pub trait PolicyStore: Send + Sync {
    /// Read an integer value under the policy root.
    fn read_integer(&self, name: &str) -> Lookup<u32>;

    /// Read a string value under the policy root.
    fn read_string(&self, name: &str) -> Lookup<String>;

    /// Enumerate `(name, raw text)` entries under a child key, in backend
    /// order. `None` when the key itself does not exist.
    fn enumerate_children(&self, key: &str) -> Option<Vec<(String, String)>>;
}

impl<T: PolicyStore + ?Sized> PolicyStore for &T {
    fn read_integer(&self, name: &str) -> Lookup<u32> {
        (**self).read_integer(name)
    }

    fn read_string(&self, name: &str) -> Lookup<String> {
        (**self).read_string(name)
    }

    fn enumerate_children(&self, key: &str) -> Option<Vec<(String, String)>> {
        (**self).enumerate_children(key)
    }
}

impl<T: PolicyStore + ?Sized> PolicyStore for Arc<T> {
    fn read_integer(&self, name: &str) -> Lookup<u32> {
        (**self).read_integer(name)
    }

    fn read_string(&self, name: &str) -> Lookup<String> {
        (**self).read_string(name)
    }

    fn enumerate_children(&self, key: &str) -> Option<Vec<(String, String)>> {
        (**self).enumerate_children(key)
    }
}

impl<T: PolicyStore + ?Sized> PolicyStore for Box<T> {
    fn read_integer(&self, name: &str) -> Lookup<u32> {
        (**self).read_integer(name)
    }

    fn read_string(&self, name: &str) -> Lookup<String> {
        (**self).read_string(name)
    }

    fn enumerate_children(&self, key: &str) -> Option<Vec<(String, String)>> {
        (**self).enumerate_children(key)
    }
}
