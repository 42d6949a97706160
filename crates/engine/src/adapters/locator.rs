//! Store locator: where the JSON policy document comes from.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use super::json::JsonPolicyStore;
use crate::domain::error::PolicyResult;
use crate::domain::types::PolicyDefaults;

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("Invalid store locator scheme: expected 'file:' or 'env:'")]
    InvalidScheme,
    #[error("Missing path for 'file:' locator")]
    MissingPath,
    #[error("Missing variable name for 'env:' locator")]
    MissingEnvVar,
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
}

/// Location of a JSON policy document.
/// Format examples:
/// - file:/etc/pkgpolicy/policies.json
/// - env:PKGPOLICY_DOCUMENT
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocator {
    File(PathBuf),
    Env(String),
}

impl FromStr for StoreLocator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, value) = s.split_once(':').ok_or(LocatorError::InvalidScheme)?;
        let value = value.trim();

        match scheme {
            "file" if value.is_empty() => Err(LocatorError::MissingPath),
            "file" => Ok(StoreLocator::File(PathBuf::from(value))),
            "env" if value.is_empty() => Err(LocatorError::MissingEnvVar),
            "env" => Ok(StoreLocator::Env(value.to_string())),
            _ => Err(LocatorError::InvalidScheme),
        }
    }
}

impl StoreLocator {
    /// Locator named by `PolicyDefaults::STORE_LOCATOR_ENV`, if set.
    pub fn from_default_env() -> Result<Option<Self>, LocatorError> {
        match std::env::var(PolicyDefaults::STORE_LOCATOR_ENV) {
            Ok(s) => s.parse().map(Some),
            Err(_) => Ok(None),
        }
    }

    /// Load the document this locator points at.
    pub fn resolve(&self) -> PolicyResult<JsonPolicyStore> {
        match self {
            StoreLocator::File(path) => JsonPolicyStore::open(path),
            StoreLocator::Env(var) => {
                let document = std::env::var(var)
                    .map_err(|_| LocatorError::EnvVarNotFound(var.clone()))?;
                JsonPolicyStore::from_json_str(&document)
            }
        }
    }
}
