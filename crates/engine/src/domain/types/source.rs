use serde::{Deserialize, Deserializer, Serialize};

use super::pinning::PinningConfiguration;
use crate::domain::error::PolicyResult;

/// A package source specified by an administrator through a list policy.
///
/// Every field except the pinning configuration is required on the wire; an
/// entry that misses one or carries the wrong JSON type is never built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SourceFromPolicy {
    pub name: String,
    pub arg: String,
    #[serde(rename = "Type")]
    pub source_type: String,
    pub data: String,
    pub identifier: String,
    /// Trust tags such as `Trusted` or `StoreOrigin`, in the order given.
    pub trust_level: Vec<String>,
    pub explicit: bool,
    /// Empty when the entry does not request a trust override.
    #[serde(
        rename = "CertificatePinning",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "PinningConfiguration::is_empty"
    )]
    pub pinning_configuration: PinningConfiguration,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PinningConfiguration, D::Error> {
    Ok(Option::<PinningConfiguration>::deserialize(deserializer)?.unwrap_or_default())
}

impl SourceFromPolicy {
    /// Parse one list-policy entry. Any malformed field, including a malformed
    /// `CertificatePinning` object, rejects the whole entry.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize into the form administrators write into list policies.
    pub fn to_json_string(&self) -> PolicyResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: &str = r#"{ "Name":"n", "Arg":"a", "Type":"t", "Data":"d", "Identifier":"i",
        "TrustLevel":["Trusted","StoreOrigin","Trusted"], "Explicit":false }"#;

    #[test]
    fn trust_levels_keep_order_and_duplicates() {
        let source = SourceFromPolicy::from_json_str(ENTRY).unwrap();
        assert_eq!(source.trust_level, vec!["Trusted", "StoreOrigin", "Trusted"]);
        assert!(source.pinning_configuration.is_empty());
    }

    #[test]
    fn null_pinning_reads_as_empty() {
        let json = ENTRY.replace("\"Explicit\":false", "\"Explicit\":false, \"CertificatePinning\":null");
        let source = SourceFromPolicy::from_json_str(&json).unwrap();
        assert!(source.pinning_configuration.is_empty());
    }

    #[test]
    fn empty_pinning_is_not_serialized() {
        let source = SourceFromPolicy::from_json_str(ENTRY).unwrap();
        let json = source.to_json_string().unwrap();
        assert!(!json.contains("CertificatePinning"));
        assert!(json.contains("\"Type\":\"t\""));
    }

    #[test]
    fn explicit_must_be_bool() {
        let json = ENTRY.replace("\"Explicit\":false", "\"Explicit\":\"false\"");
        assert!(SourceFromPolicy::from_json_str(&json).is_err());
    }
}
