use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::error::{PolicyError, PolicyResult};
use crate::domain::store::PolicyStore;
use crate::domain::types::{Lookup, PolicyDefaults};

/// Policy store backed by a JSON document.
///
/// The top-level object maps value names to values. A nested object is a
/// child key whose members are its entries: string members are passed
/// through as raw text, anything else is re-serialized.
///
/// ```json
/// {
///   "EnablePackageManager": 1,
///   "SourceAutoUpdateInterval": 30,
///   "AdditionalSources": { "0": "{ \"Name\": ... }", "1": { "Name": "..." } }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonPolicyStore {
  root: Map<String, Value>,
}

impl JsonPolicyStore {
  pub fn from_json_str(document: &str) -> PolicyResult<Self> {
    if document.len() > PolicyDefaults::MAX_DOCUMENT_SIZE {
      return Err(PolicyError::Config(format!(
        "policy document too large: {} bytes (max: {})",
        document.len(),
        PolicyDefaults::MAX_DOCUMENT_SIZE
      )));
    }
    match serde_json::from_str(document)? {
      Value::Object(root) => Ok(Self { root }),
      _ => Err(PolicyError::Config("policy document must be a JSON object".into())),
    }
  }

  pub fn open(path: impl AsRef<Path>) -> PolicyResult<Self> {
    let path = path.as_ref();
    let len = std::fs::metadata(path)?.len();
    if len > PolicyDefaults::MAX_DOCUMENT_SIZE as u64 {
      return Err(PolicyError::Config(format!(
        "policy document too large: {} bytes (max: {})",
        len,
        PolicyDefaults::MAX_DOCUMENT_SIZE
      )));
    }
    let document = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), "loaded policy document");
    Self::from_json_str(&document)
  }
}

impl PolicyStore for JsonPolicyStore {
  fn read_integer(&self, name: &str) -> Lookup<u32> {
    match self.root.get(name) {
      None => Lookup::Absent,
      Some(Value::Number(n)) => integer_as_dword(n).map_or(Lookup::WrongType, Lookup::Present),
      Some(_) => Lookup::WrongType,
    }
  }

  fn read_string(&self, name: &str) -> Lookup<String> {
    match self.root.get(name) {
      None => Lookup::Absent,
      Some(Value::String(s)) => Lookup::Present(s.clone()),
      Some(_) => Lookup::WrongType,
    }
  }

  fn enumerate_children(&self, key: &str) -> Option<Vec<(String, String)>> {
    match self.root.get(key)? {
      Value::Object(entries) => Some(
        entries
          .iter()
          .map(|(name, value)| {
            let text = match value {
              Value::String(s) => s.clone(),
              other => other.to_string(),
            };
            (name.clone(), text)
          })
          .collect(),
      ),
      _ => {
        debug!(key, "policy key is a value, not a child key");
        None
      }
    }
  }
}

/// Any JSON integer is a DWORD. Negative values in `i32` range keep their
/// two's-complement bits and everything else outside `u32` saturates, so a
/// nonzero integer never reads as zero. Floats are not integers.
fn integer_as_dword(n: &serde_json::Number) -> Option<u32> {
  if let Some(v) = n.as_u64() {
    return Some(u32::try_from(v).unwrap_or(u32::MAX));
  }
  let v = n.as_i64()?;
  Some(i32::try_from(v).map_or(u32::MAX, |v| v as u32))
}
