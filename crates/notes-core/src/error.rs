//! Error types for note service operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the server layer maps them
//! to fixed public messages through [`NotesError::kind`].

use thiserror::Error;

/// Result type alias for note operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Failures raised by the cipher when a stored blob cannot be opened.
///
/// These signal data corruption, never a wrong passphrase. The passphrase is
/// checked against the stored verifier before the cipher is ever invoked.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Blob does not have the `iv:ciphertext` shape
    #[error("Malformed blob: {0}")]
    MalformedBlob(String),

    /// PKCS#7 padding check failed after decryption
    #[error("Invalid padding")]
    PaddingInvalid,

    /// Decrypted bytes are not valid UTF-8
    #[error("Decrypted content is not valid UTF-8")]
    InvalidPlaintext,

    /// Key or IV had the wrong length for the cipher
    #[error("Invalid cipher parameter length")]
    InvalidLength,
}

/// Core error type for note operations.
#[derive(Debug, Error)]
pub enum NotesError {
    /// Required input missing or empty
    #[error("Validation error: {0}")]
    Validation(String),

    /// Note not found by ID
    #[error("Note not found: {0}")]
    NotFound(i64),

    /// Passphrase fingerprint does not match the stored verifier
    #[error("Invalid passphrase")]
    Unauthorized,

    /// Stored blob could not be decrypted
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Stored row is readable but its contents do not parse
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },
}

/// Coarse classification of [`NotesError`] for callers that translate
/// errors into transport responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller supplied missing or empty input
    Validation,

    /// No note with the requested id
    NotFound,

    /// Passphrase rejected by the verifier
    Authorization,

    /// Stored data failed to decrypt or parse (blob or row corruption)
    Crypto,

    /// Store unreachable or a query failed
    Persistence,
}

impl NotesError {
    /// Classify this error.
    ///
    /// Corrupt rows share `ErrorKind::Crypto` with corrupt blobs: both mean
    /// the store answered but its data is unusable.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NotesError::Validation(_) => ErrorKind::Validation,
            NotesError::NotFound(_) => ErrorKind::NotFound,
            NotesError::Unauthorized => ErrorKind::Authorization,
            NotesError::Crypto(_) | NotesError::CorruptRow(_) => ErrorKind::Crypto,
            NotesError::Storage(_) | NotesError::Sqlite { .. } => ErrorKind::Persistence,
        }
    }
}

impl From<std::io::Error> for NotesError {
    fn from(err: std::io::Error) -> Self {
        NotesError::Storage(err.to_string())
    }
}
