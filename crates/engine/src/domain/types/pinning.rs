use serde::{Deserialize, Serialize};

/// Attribute of a certificate that a pinning link requires to match.
///
/// Wire tags are case-sensitive: `"publickey"`, `"subject"`, `"issuer"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    PublicKey,
    Subject,
    Issuer,
}

/// One link of a pinned chain: the certificate to compare against and the
/// attributes that must match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinningCertificateDetail {
    #[serde(rename = "Validation")]
    validation: Vec<ValidationMode>,
    /// DER bytes; hex or base64 encoded in transit.
    #[serde(rename = "EmbeddedCertificate", with = "embedded_certificate")]
    embedded_certificate: Vec<u8>,
}

impl PinningCertificateDetail {
    pub fn new(embedded_certificate: Vec<u8>, validation: Vec<ValidationMode>) -> Self {
        Self { validation, embedded_certificate }
    }

    pub fn validation(&self) -> &[ValidationMode] {
        &self.validation
    }

    pub fn embedded_certificate(&self) -> &[u8] {
        &self.embedded_certificate
    }
}

/// A pinned chain, ordered root first and leaf last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinningChain {
    #[serde(rename = "Chain")]
    details: Vec<PinningCertificateDetail>,
}

impl PinningChain {
    pub fn new(details: Vec<PinningCertificateDetail>) -> Self {
        Self { details }
    }

    /// Append the next link towards the leaf.
    pub fn then(mut self, detail: PinningCertificateDetail) -> Self {
        self.details.push(detail);
        self
    }

    pub fn details(&self) -> &[PinningCertificateDetail] {
        &self.details
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }
}

/// Alternative chains that authorize a source; matching any one is enough.
/// An empty configuration means no pinning was requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinningConfiguration {
    #[serde(rename = "Chains")]
    chains: Vec<PinningChain>,
}

impl PinningConfiguration {
    pub fn new(chains: Vec<PinningChain>) -> Self {
        Self { chains }
    }

    pub fn add_chain(&mut self, chain: PinningChain) {
        self.chains.push(chain);
    }

    pub fn chains(&self) -> &[PinningChain] {
        &self.chains
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

/// Hex on the way out; hex or standard base64 on the way in.
///
/// Hex wins: any even-length all-hex string is decoded as hex, so a base64
/// text that happens to be made of hex digits (`"ABCD"`) is read as hex.
/// Base64 DER starts with `MI`, which never looks like hex.
mod embedded_certificate {
    use base64::Engine as _;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        decode(&text).map_err(de::Error::custom)
    }

    pub(super) fn decode(text: &str) -> Result<Vec<u8>, String> {
        let text = text.trim();
        if text.is_empty() {
            return Err("embedded certificate is empty".into());
        }
        if text.len() % 2 == 0 && text.bytes().all(|b| b.is_ascii_hexdigit()) {
            return hex::decode(text).map_err(|e| format!("invalid hex certificate: {e}"));
        }
        base64::engine::general_purpose::STANDARD
            .decode(text)
            .map_err(|e| format!("embedded certificate is neither hex nor base64: {e}"))
    }
}
