#![allow(dead_code)]

use rcgen::{
    BasicConstraints, Certificate, CertificateParams, DistinguishedName, DnType, IsCa, KeyPair,
    SerialNumber, PKCS_ECDSA_P256_SHA256,
};

/// Build one list-policy entry the way an administrator would write it.
/// `trust_level` and `explicit` are raw JSON fragments so tests can feed
/// mistyped values.
pub fn source_json(
    name: &str,
    arg: &str,
    source_type: &str,
    data: &str,
    identifier: &str,
    trust_level: &str,
    explicit: &str,
    pinning: Option<&str>,
) -> String {
    let mut json = format!(
        r#"{{ "Name":"{name}", "Arg":"{arg}", "Type":"{source_type}", "Data":"{data}", "Identifier":"{identifier}", "TrustLevel":{trust_level}, "Explicit":{explicit}"#
    );
    if let Some(pinning) = pinning {
        json.push_str(&format!(r#", "CertificatePinning":{pinning}"#));
    }
    json.push_str(" }");
    json
}

/// Shorthand for a valid entry whose string fields all start with `prefix`.
pub fn simple_source_json(prefix: &str, trust_level: &str, explicit: bool) -> String {
    source_json(
        &format!("{prefix}-name"),
        &format!("{prefix}-arg"),
        &format!("{prefix}-type"),
        &format!("{prefix}-data"),
        &format!("{prefix}-identifier"),
        trust_level,
        if explicit { "true" } else { "false" },
        None,
    )
}

/// A root -> intermediate -> leaf chain generated with rcgen. DER bytes are
/// produced once so pinned and actual certificates are byte-identical.
pub struct TestChain {
    pub root: Vec<u8>,
    pub intermediate: Vec<u8>,
    pub leaf: Vec<u8>,
    intermediate_cert: Certificate,
    leaf_key_der: Vec<u8>,
    leaf_name: String,
}

fn ca_params(common_name: &str) -> CertificateParams {
    let mut params = CertificateParams::new(vec![]);
    params.alg = &PKCS_ECDSA_P256_SHA256;
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, common_name);
    params.distinguished_name = dn;
    params
}

fn leaf_params(common_name: &str, key: KeyPair, year: i32, serial: u64) -> CertificateParams {
    let mut params = CertificateParams::new(vec![format!("{}.example.test", common_name.to_lowercase())]);
    params.alg = &PKCS_ECDSA_P256_SHA256;
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, common_name);
    params.distinguished_name = dn;
    params.not_before = rcgen::date_time_ymd(year, 1, 1);
    params.key_pair = Some(key);
    params.serial_number = Some(SerialNumber::from(serial));
    params
}

impl TestChain {
    pub fn generate(prefix: &str) -> Self {
        let root_cert = Certificate::from_params(ca_params(&format!("{prefix} Root"))).expect("root cert");
        let intermediate_cert =
            Certificate::from_params(ca_params(&format!("{prefix} Intermediate"))).expect("intermediate cert");

        let leaf_key = KeyPair::generate(&PKCS_ECDSA_P256_SHA256).expect("leaf keypair");
        let leaf_key_der = leaf_key.serialize_der();
        let leaf_name = format!("{prefix} Leaf");
        let leaf_cert = Certificate::from_params(leaf_params(&leaf_name, leaf_key, 2024, 1)).expect("leaf cert");

        let root = root_cert.serialize_der().expect("root der");
        let intermediate = intermediate_cert
            .serialize_der_with_signer(&root_cert)
            .expect("intermediate der");
        let leaf = leaf_cert
            .serialize_der_with_signer(&intermediate_cert)
            .expect("leaf der");

        Self { root, intermediate, leaf, intermediate_cert, leaf_key_der, leaf_name }
    }

    /// Reissue the leaf with the same subject, issuer and key but a new
    /// serial and validity period.
    pub fn renew_leaf(&self) -> Vec<u8> {
        let key = KeyPair::from_der(&self.leaf_key_der).expect("leaf key");
        let cert = Certificate::from_params(leaf_params(&self.leaf_name, key, 2025, 2)).expect("renewed leaf");
        cert.serialize_der_with_signer(&self.intermediate_cert).expect("renewed leaf der")
    }

    /// Root-first list of DER certificates.
    pub fn ders(&self) -> [&[u8]; 3] {
        [&self.root, &self.intermediate, &self.leaf]
    }
}

/// The canonical three-link pinning document: root pinned on its key,
/// intermediate and leaf pinned on subject and issuer.
pub fn pinning_json(root: &str, intermediate: &str, leaf: &str) -> String {
    format!(
        r#"{{
    "Chains": [{{
        "Chain":[
            {{ "Validation": ["publickey"], "EmbeddedCertificate": "{root}" }},
            {{ "Validation": ["subject","issuer"], "EmbeddedCertificate": "{intermediate}" }},
            {{ "Validation": ["subject","issuer"], "EmbeddedCertificate": "{leaf}" }}
        ]
    }}]
}}"#
    )
}

pub fn hex_pinning_json(chain: &TestChain) -> String {
    pinning_json(&hex::encode(&chain.root), &hex::encode(&chain.intermediate), &hex::encode(&chain.leaf))
}
