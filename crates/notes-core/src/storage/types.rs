//! Core data types for the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored note, as persisted.
///
/// Only the store and the service see this type. It carries the ciphertext
/// and verifier, so it is deliberately not `Serialize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Store-assigned identifier, increasing in insertion order
    pub id: i64,

    /// `hex(iv):hex(ciphertext)`
    pub encrypted_content: String,

    /// Hex SHA-256 of the passphrase
    pub key_hash: String,

    /// When the store accepted this note
    pub created_at: DateTime<Utc>,

    /// Optional listing scope tag
    pub owner: Option<String>,
}

/// Public view of a note: identity and creation time only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Note> for NoteSummary {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            created_at: note.created_at,
        }
    }
}

/// Row to be inserted. The store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub encrypted_content: String,
    pub key_hash: String,
    pub owner: Option<String>,
}

impl NewNote {
    pub fn new(encrypted_content: impl Into<String>, key_hash: impl Into<String>) -> Self {
        Self {
            encrypted_content: encrypted_content.into(),
            key_hash: key_hash.into(),
            owner: None,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

/// Filter for listing notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Only notes carrying exactly this owner tag
    pub owner: Option<String>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl NoteFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
