// crates/engine/src/domain/error.rs
use thiserror::Error;

use super::policy::TogglePolicy;

#[derive(Debug, Error)]
pub enum PolicyError {
  #[error("configuration: {0}")]
  Config(String),

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),

  #[cfg(feature = "openssl")]
  #[error(transparent)]
  Openssl(#[from] openssl::error::ErrorStack),

  #[cfg(feature = "json_store")]
  #[error(transparent)]
  Locator(#[from] crate::adapters::LocatorError),

  #[error("feature not enabled: {0}")]
  Feature(&'static str),

  /// Raised by callers that refuse an operation an administrator has disabled.
  #[error("disabled by group policy: {}", .policy.display_name())]
  BlockedByPolicy { policy: TogglePolicy },
}

pub type PolicyResult<T> = Result<T, PolicyError>;
