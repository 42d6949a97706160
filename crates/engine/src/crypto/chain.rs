//! Issuer lookup: builds the actual chain of a leaf certificate from a pool
//! of candidate issuers.

use openssl::x509::{X509, X509Ref, X509VerifyResult};
use tracing::{debug, trace};

use crate::domain::error::PolicyResult;
use crate::domain::types::PolicyDefaults;

/// Candidate issuer certificates, typically the intermediates and roots the
/// client trusts or received alongside the leaf.
#[derive(Debug, Clone, Default)]
pub struct CertificatePool {
    certs: Vec<X509>,
}

impl CertificatePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_certificates(certs: Vec<X509>) -> Self {
        Self { certs }
    }

    /// Load every certificate from a PEM bundle.
    pub fn from_pem(pem: &[u8]) -> PolicyResult<Self> {
        Ok(Self { certs: X509::stack_from_pem(pem)? })
    }

    pub fn from_der<I, B>(ders: I) -> PolicyResult<Self>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let certs = ders
            .into_iter()
            .map(|der| X509::from_der(der.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { certs })
    }

    pub fn push(&mut self, cert: X509) {
        self.certs.push(cert);
    }

    pub fn len(&self) -> usize {
        self.certs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certs.is_empty()
    }

    /// Walk from `leaf` towards its root and return the chain root first.
    ///
    /// Stops at a self-issued certificate, when no issuer is found, or after
    /// `PolicyDefaults::MAX_CHAIN_DEPTH` certificates. A partial chain is
    /// returned as-is.
    pub fn build_chain(&self, leaf: &X509Ref) -> Vec<X509> {
        let mut chain = vec![leaf.to_owned()];

        while chain.len() < PolicyDefaults::MAX_CHAIN_DEPTH {
            let Some(current) = chain.last() else { break };
            if signs(current, current) {
                break;
            }
            let next = self
                .certs
                .iter()
                .find(|candidate| !contains(&chain, candidate) && signs(candidate, current));
            match next {
                Some(issuer) => chain.push(issuer.clone()),
                None => {
                    debug!(depth = chain.len(), "no issuer found; chain is partial");
                    break;
                }
            }
        }

        trace!(depth = chain.len(), "built certificate chain");
        chain.reverse();
        chain
    }
}

/// Whether `issuer` names and signed `subject`.
fn signs(issuer: &X509Ref, subject: &X509Ref) -> bool {
    if issuer.issued(subject) != X509VerifyResult::OK {
        return false;
    }
    issuer
        .public_key()
        .and_then(|key| subject.verify(&key))
        .unwrap_or(false)
}

fn contains(chain: &[X509], cert: &X509Ref) -> bool {
    let Ok(der) = cert.to_der() else { return false };
    chain.iter().any(|c| c.to_der().map(|d| d == der).unwrap_or(false))
}
