//! # Notes Core
//!
//! Core library for Secret Notes - passphrase-encrypted notes behind a
//! narrow service interface.
//!
//! This crate provides the encryption, verification, and persistence logic
//! independent of any transport.
//!
//! ## Architecture
//!
//! - **crypto**: key derivation, AES-256-CBC cipher, passphrase verifier
//! - **storage**: `NoteStore` trait and the SQLite implementation
//! - **service**: `NoteService` orchestrating create, decrypt, and list

pub mod crypto;
pub mod error;
pub mod service;
pub mod storage;

pub use error::{CryptoError, ErrorKind, NotesError, Result};
pub use service::NoteService;
pub use storage::{NoteFilter, NoteStore, NoteSummary, SqliteNoteStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
