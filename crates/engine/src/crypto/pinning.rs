//! Pinning validation: compares an actual certificate chain with the chains
//! an administrator pinned for a source.
//!
//! Links are compared attribute by attribute (public key, subject, issuer)
//! rather than by certificate bytes, so a renewed certificate with a new
//! serial but the same key and names keeps validating.

use openssl::error::ErrorStack;
use openssl::x509::{X509, X509Ref};
use tracing::debug;

use super::chain::CertificatePool;
use crate::domain::error::PolicyResult;
use crate::domain::types::{PinningCertificateDetail, PinningChain, PinningConfiguration, ValidationMode};

impl PinningConfiguration {
    /// Validate `leaf` by building its chain from `issuers` and matching it
    /// against every configured chain. An empty configuration never matches.
    pub fn validate(&self, leaf: &X509Ref, issuers: &CertificatePool) -> bool {
        if self.is_empty() {
            return false;
        }
        let chain = issuers.build_chain(leaf);
        self.validate_chain(&chain)
    }

    /// Same as [`validate`](Self::validate) with DER inputs. Fails only when
    /// the leaf itself cannot be parsed.
    pub fn validate_der(&self, leaf_der: &[u8], issuers: &CertificatePool) -> PolicyResult<bool> {
        let leaf = X509::from_der(leaf_der)?;
        Ok(self.validate(&leaf, issuers))
    }

    /// Match an already resolved chain, ordered root first. The first
    /// matching configured chain wins.
    pub fn validate_chain(&self, chain: &[X509]) -> bool {
        self.chains().iter().enumerate().any(|(index, pinned)| {
            let matched = chain_matches(pinned, chain);
            debug!(chain = index, matched, "evaluated pinned chain");
            matched
        })
    }
}

/// Chains must have the same length and every position must match.
fn chain_matches(pinned: &PinningChain, actual: &[X509]) -> bool {
    if pinned.is_empty() || pinned.len() != actual.len() {
        return false;
    }
    pinned
        .details()
        .iter()
        .zip(actual)
        .all(|(detail, cert)| detail_matches(detail, cert))
}

fn detail_matches(detail: &PinningCertificateDetail, actual: &X509Ref) -> bool {
    let embedded = match X509::from_der(detail.embedded_certificate()) {
        Ok(cert) => cert,
        Err(e) => {
            debug!(error = %e, "embedded certificate is not valid DER");
            return false;
        }
    };
    detail
        .validation()
        .iter()
        .all(|mode| attribute_matches(*mode, &embedded, actual))
}

fn attribute_matches(mode: ValidationMode, expected: &X509Ref, actual: &X509Ref) -> bool {
    match (attribute_der(mode, expected), attribute_der(mode, actual)) {
        (Ok(expected), Ok(actual)) => expected == actual,
        _ => false,
    }
}

fn attribute_der(mode: ValidationMode, cert: &X509Ref) -> Result<Vec<u8>, ErrorStack> {
    match mode {
        ValidationMode::PublicKey => cert.public_key()?.public_key_to_der(),
        ValidationMode::Subject => cert.subject_name().to_der(),
        ValidationMode::Issuer => cert.issuer_name().to_der(),
    }
}
