/// Centralized defaults for the policy engine.
/// All opinionated constants should be defined here for consistency.
pub struct PolicyDefaults;

impl PolicyDefaults {
    // Store defaults
    /// Environment variable consulted for a store locator when none is given.
    pub const STORE_LOCATOR_ENV: &'static str = "PKGPOLICY_STORE";
    /// Largest JSON policy document accepted by the file store.
    pub const MAX_DOCUMENT_SIZE: usize = 16 * 1024 * 1024; // 16 MB

    // Pinning defaults
    /// Longest actual chain built from a leaf during issuer lookup.
    pub const MAX_CHAIN_DEPTH: usize = 10;
}
