//! Storage abstraction for secret notes.
//!
//! This module defines the `NoteStore` trait and core types for persisting
//! encrypted notes.
//!
//! ## Architecture
//!
//! The storage layer is backend-agnostic. The service depends only on the
//! trait; `SqliteNoteStore` is the shipped implementation.
//!
//! ## Security
//!
//! Stores hold ciphertext and passphrase verifiers, never passphrases or
//! plaintext. Listing queries return ids and timestamps only.

pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export public types
pub use sqlite::SqliteNoteStore;
pub use traits::NoteStore;
pub use types::{NewNote, Note, NoteFilter, NoteSummary};
