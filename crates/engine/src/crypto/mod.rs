//! Certificate handling for source pinning.
//! Only available with the `openssl` feature.

pub mod chain;
pub mod pinning;
