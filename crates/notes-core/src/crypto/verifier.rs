//! Passphrase verifier.
//!
//! The verifier is the lowercase hex SHA-256 of the raw passphrase. It is
//! stored next to each note and compared before any decryption is attempted,
//! so a wrong passphrase is rejected without touching the cipher.
//!
//! The verifier is not a one-way secret: it equals the hex-encoded cipher
//! key from [`super::derive_key`], so it must be treated as key material.

use sha2::{Digest, Sha256};

/// Length of a verifier string in hex characters.
pub const FINGERPRINT_HEX_LENGTH: usize = 64;

/// Compute the stored verifier for a passphrase.
///
/// # Examples
///
/// ```
/// use notes_core::crypto::fingerprint;
///
/// let hash = fingerprint("correctKey123");
/// assert_eq!(hash.len(), 64);
/// ```
pub fn fingerprint(passphrase: &str) -> String {
    hex::encode(Sha256::digest(passphrase.as_bytes()))
}

/// Check a candidate passphrase against a stored verifier.
///
/// A stored value that is not a 64-character hex string never matches.
pub fn verify(candidate: &str, stored_hash: &str) -> bool {
    let mut stored = [0u8; 32];
    if stored_hash.len() != FINGERPRINT_HEX_LENGTH
        || hex::decode_to_slice(stored_hash, &mut stored).is_err()
    {
        return false;
    }

    let mut computed = [0u8; 32];
    computed.copy_from_slice(&Sha256::digest(candidate.as_bytes()));
    constant_time_eq(&computed, &stored)
}

/// Constant-time comparison to prevent timing side channels.
fn constant_time_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
