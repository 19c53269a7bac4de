//! AES-256-CBC encryption of note content.
//!
//! A blob is the hex-encoded IV and ciphertext joined by a single `:`:
//!
//! ```text
//! 177d66f5c72de640afb844c172228ecb:a897f78810a6bca20990863f9aa34ac9...
//! \______________________________/ \_________________________________/
//!          16-byte IV (hex)                 ciphertext (hex)
//! ```

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;

use super::key::derive_key;
use crate::error::CryptoError;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Separator between the IV and ciphertext fields of a blob.
pub const BLOB_DELIMITER: char = ':';

/// IV length in bytes (one AES block).
pub const IV_LENGTH: usize = 16;

const BLOCK_SIZE: usize = 16;

/// Encrypt `plaintext` under a key derived from `passphrase`.
///
/// Every call draws a fresh IV from the OS RNG, so encrypting the same
/// content twice under the same passphrase yields different blobs.
///
/// # Examples
///
/// ```
/// use notes_core::crypto::{decrypt, encrypt};
///
/// let blob = encrypt(b"secret data", "my-passphrase").unwrap();
/// let plaintext = decrypt(&blob, "my-passphrase").unwrap();
/// assert_eq!(plaintext, b"secret data");
/// ```
pub fn encrypt(plaintext: &[u8], passphrase: &str) -> Result<String, CryptoError> {
    let key = derive_key(passphrase);

    let mut iv = [0u8; IV_LENGTH];
    OsRng.fill_bytes(&mut iv);

    let cipher = Aes256CbcEnc::new_from_slices(key.as_bytes(), &iv)
        .map_err(|_| CryptoError::InvalidLength)?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    Ok(format!(
        "{}{}{}",
        hex::encode(iv),
        BLOB_DELIMITER,
        hex::encode(ciphertext)
    ))
}

/// Decrypt a blob produced by [`encrypt`].
///
/// The caller must have checked the passphrase against the stored verifier
/// first. A padding failure here is not a reliable wrong-passphrase signal.
///
/// # Errors
///
/// - `CryptoError::MalformedBlob` if the blob does not split into a 16-byte
///   IV and a non-empty, block-aligned ciphertext
/// - `CryptoError::PaddingInvalid` if the PKCS#7 check fails
pub fn decrypt(blob: &str, passphrase: &str) -> Result<Vec<u8>, CryptoError> {
    let (iv, ciphertext) = split_blob(blob)?;
    let key = derive_key(passphrase);

    let cipher = Aes256CbcDec::new_from_slices(key.as_bytes(), &iv)
        .map_err(|_| CryptoError::InvalidLength)?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| CryptoError::PaddingInvalid)
}

fn split_blob(blob: &str) -> Result<([u8; IV_LENGTH], Vec<u8>), CryptoError> {
    let (iv_hex, ciphertext_hex) = blob
        .split_once(BLOB_DELIMITER)
        .ok_or_else(|| CryptoError::MalformedBlob("missing delimiter".to_string()))?;

    if ciphertext_hex.contains(BLOB_DELIMITER) {
        return Err(CryptoError::MalformedBlob(
            "more than one delimiter".to_string(),
        ));
    }

    if iv_hex.len() != IV_LENGTH * 2 {
        return Err(CryptoError::MalformedBlob(format!(
            "IV field must be {} hex characters (got {})",
            IV_LENGTH * 2,
            iv_hex.len()
        )));
    }

    let mut iv = [0u8; IV_LENGTH];
    hex::decode_to_slice(iv_hex, &mut iv)
        .map_err(|e| CryptoError::MalformedBlob(format!("IV is not hex: {}", e)))?;

    let ciphertext = hex::decode(ciphertext_hex)
        .map_err(|e| CryptoError::MalformedBlob(format!("ciphertext is not hex: {}", e)))?;
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::MalformedBlob(format!(
            "ciphertext length {} is not a positive multiple of {}",
            ciphertext.len(),
            BLOCK_SIZE
        )));
    }

    Ok((iv, ciphertext))
}
