//! Key derivation from passphrases.
//!
//! The cipher key is the SHA-256 digest of the raw passphrase bytes. The
//! derivation is deterministic and unsalted so that a note can be reopened
//! with nothing but the passphrase.
//!
//! The key is byte-for-byte the stored verifier: `fingerprint(p)` is
//! `hex(derive_key(p))`. A row's `key_hash` therefore decrypts its own
//! `encrypted_content`.

use sha2::{Digest, Sha256};
use zeroize::ZeroizeOnDrop;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256).
pub const KEY_LENGTH: usize = 32;

/// A cryptographic key derived from a passphrase.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an AES-256 key from a passphrase.
///
/// Same passphrase always produces the same key.
///
/// # Examples
///
/// ```
/// use notes_core::crypto::derive_key;
///
/// let a = derive_key("my-passphrase");
/// let b = derive_key("my-passphrase");
/// assert_eq!(a.as_bytes(), b.as_bytes());
/// ```
pub fn derive_key(passphrase: &str) -> DerivedKey {
    let digest = Sha256::digest(passphrase.as_bytes());
    let mut bytes = [0u8; KEY_LENGTH];
    bytes.copy_from_slice(&digest);
    DerivedKey::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation_deterministic() {
        let key1 = derive_key("test-passphrase");
        let key2 = derive_key("test-passphrase");

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let key1 = derive_key("passphrase-one");
        let key2 = derive_key("passphrase-two");

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_known_digest() {
        let key = derive_key("correctKey123");
        assert_eq!(
            hex::encode(key.as_bytes()),
            "0a2f59d5afb5d5aa0d6d20fefd3372c29e830681d9605b1f3d3c41abdeebd71c"
        );
    }

    #[test]
    fn test_stored_verifier_is_hex_of_key() {
        // Pinned so that separating key and verifier is a visible change.
        for passphrase in ["correctKey123", "hunter2", " spaced "] {
            let key = derive_key(passphrase);
            assert_eq!(
                hex::encode(key.as_bytes()),
                crate::crypto::fingerprint(passphrase)
            );
        }
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive_key("test-passphrase");
        let debug_output = format!("{:?}", key);

        assert!(debug_output.contains("REDACTED"));
        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
