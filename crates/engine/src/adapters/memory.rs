use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::store::PolicyStore;
use crate::domain::types::Lookup;

#[derive(Debug, Clone)]
enum StoredValue {
  Integer(u32),
  String(String),
}

#[derive(Debug, Default)]
struct Inner {
  values: HashMap<String, StoredValue>,
  /// Child keys and their entries, kept in insertion order.
  keys: HashMap<String, Vec<(String, String)>>,
}

/// In-process policy store. Values can be changed between queries and the
/// engine observes the change on its next read.
///
/// Value names and keys live in separate namespaces, like a registry key
/// with values and subkeys. Names are case-sensitive.
#[derive(Debug, Default)]
pub struct MemoryPolicyStore {
  inner: RwLock<Inner>,
}

impl MemoryPolicyStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set_integer(&self, name: &str, value: u32) {
    self.write(|inner| {
      inner.values.insert(name.to_owned(), StoredValue::Integer(value));
    });
  }

  pub fn set_string(&self, name: &str, value: &str) {
    self.write(|inner| {
      inner.values.insert(name.to_owned(), StoredValue::String(value.to_owned()));
    });
  }

  pub fn remove_value(&self, name: &str) {
    self.write(|inner| {
      inner.values.remove(name);
    });
  }

  /// Create an empty child key. Existing entries are kept.
  pub fn create_key(&self, key: &str) {
    self.write(|inner| {
      inner.keys.entry(key.to_owned()).or_default();
    });
  }

  /// Set an entry under a child key, creating the key if needed. An entry
  /// with the same name is replaced in place.
  pub fn set_child(&self, key: &str, name: &str, text: &str) {
    self.write(|inner| {
      let entries = inner.keys.entry(key.to_owned()).or_default();
      match entries.iter_mut().find(|(n, _)| n == name) {
        Some(entry) => entry.1 = text.to_owned(),
        None => entries.push((name.to_owned(), text.to_owned())),
      }
    });
  }

  pub fn remove_key(&self, key: &str) {
    self.write(|inner| {
      inner.keys.remove(key);
    });
  }

  fn write(&self, f: impl FnOnce(&mut Inner)) {
    // A panic in another writer leaves the maps consistent; keep going.
    let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
    f(&mut *guard);
  }

  fn read<T>(&self, f: impl FnOnce(&Inner) -> T) -> T {
    let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
    f(&*guard)
  }
}

impl PolicyStore for MemoryPolicyStore {
  fn read_integer(&self, name: &str) -> Lookup<u32> {
    self.read(|inner| match inner.values.get(name) {
      Some(StoredValue::Integer(v)) => Lookup::Present(*v),
      Some(StoredValue::String(_)) => Lookup::WrongType,
      None => Lookup::Absent,
    })
  }

  fn read_string(&self, name: &str) -> Lookup<String> {
    self.read(|inner| match inner.values.get(name) {
      Some(StoredValue::String(v)) => Lookup::Present(v.clone()),
      Some(StoredValue::Integer(_)) => Lookup::WrongType,
      None => Lookup::Absent,
    })
  }

  fn enumerate_children(&self, key: &str) -> Option<Vec<(String, String)>> {
    self.read(|inner| inner.keys.get(key).cloned())
  }
}
