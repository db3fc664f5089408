//! # Tripcode Generator
//!
//! Derives a public identity signature from a username, a secret, and the
//! server-wide salt. The username stays in the clear; only the secret is
//! protected by the hash.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
const SIGNATURE_HEX_LEN: usize = 10;

/// Stateless signature derivation with the salt injected at construction.
///
/// This is a low-entropy scheme (truncated hash, one global salt) meant for
/// lightweight pseudonymity, not real authentication. That is intentional
/// scope for this service.
#[derive(Debug, Clone)]
pub struct TripcodeGenerator {
    salt: String,
}

impl TripcodeGenerator {
    /// Accepts the salt (e.g., from configuration at startup).
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Deterministically derives `"{username}!{hash_prefix}"` where the
    /// prefix is the first 10 hex chars of SHA-256(username || secret || salt).
    pub fn generate(&self, username: &str, secret: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(username.as_bytes());
        hasher.update(secret.as_bytes());
        hasher.update(self.salt.as_bytes());
        let digest = hex::encode(hasher.finalize());
        format!("{username}!{}", &digest[..SIGNATURE_HEX_LEN])
    }
}
