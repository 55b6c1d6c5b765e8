//! Verification key fingerprinting for operational visibility.
//!
//! Operators compare the logged fingerprint against the identity provider's
//! key to confirm which key is active without exposing key material.

use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Truncated SHA-256 fingerprint of `material` as 16 lowercase hex chars.
///
/// # Examples
///
/// ```rust
/// use book_catalog::outbound::auth::key_fingerprint;
///
/// let fp = key_fingerprint(b"catalog-secret");
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(material: &[u8]) -> String {
    let digest = Sha256::digest(material);
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
