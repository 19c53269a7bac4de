//! Cryptographic operations for secret notes.
//!
//! This module provides encryption, key derivation, and passphrase
//! verification using RustCrypto primitives:
//! - **AES-256-CBC** with PKCS#7 padding for note content
//! - **SHA-256** for both key derivation and the stored verifier
//!
//! ## Security Model
//!
//! - The passphrase itself is never stored
//! - A fresh random IV is generated for every encryption
//! - The fingerprint is checked before any decryption is attempted
//! - Derived keys are zeroized from memory on drop
//!
//! ## Known Weaknesses
//!
//! The stored `key_hash` is the cipher key. Both are SHA-256(passphrase);
//! `key_hash` is just its hex encoding. Anyone who can read a row can
//! decrypt it without the passphrase, so the verifier protects the HTTP
//! surface only, not data at rest.
//!
//! Neither the key nor the verifier is salted. Identical passphrases on
//! different notes produce identical `key_hash` values, which allows
//! correlation and precomputed dictionary attacks against a leaked table.
//!
//! Both properties are kept for compatibility with existing stored rows.
//! Changing either needs a new row format and a migration.

pub mod cipher;
pub mod key;
pub mod passphrase;
pub mod verifier;

pub use cipher::{decrypt, encrypt, BLOB_DELIMITER, IV_LENGTH};
pub use key::{derive_key, DerivedKey};
pub use passphrase::validate_passphrase;
pub use verifier::{fingerprint, verify};
