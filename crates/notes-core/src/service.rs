//! Note service.
//!
//! `NoteService` ties the cipher, the verifier, and a `NoteStore` together
//! into the three operations callers see: create, decrypt, and list.
//!
//! Ordering of checks:
//! 1. Input validation, before any store or crypto work
//! 2. Store lookup
//! 3. Verifier check, before any decryption attempt
//! 4. Decryption

use crate::crypto::{self, validate_passphrase};
use crate::error::{CryptoError, NotesError, Result};
use crate::storage::{NewNote, NoteFilter, NoteStore, NoteSummary};

/// Stateless orchestrator over a note store.
///
/// The store is owned by the service; recover it with [`NoteService::into_store`]
/// to close it on shutdown.
pub struct NoteService<S> {
    store: S,
}

impl<S: NoteStore> NoteService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Encrypt and store a new note.
    ///
    /// # Errors
    ///
    /// - `NotesError::Validation` if `content` or `passphrase` is empty
    /// - `NotesError::Storage` / `NotesError::Sqlite` if the insert fails
    pub async fn create(
        &self,
        content: &str,
        passphrase: &str,
        owner: Option<&str>,
    ) -> Result<NoteSummary> {
        if content.is_empty() || passphrase.is_empty() {
            return Err(NotesError::Validation(
                "Content and passphrase are required".to_string(),
            ));
        }

        let encrypted_content = crypto::encrypt(content.as_bytes(), passphrase)?;
        let key_hash = crypto::fingerprint(passphrase);

        let mut note = NewNote::new(encrypted_content, key_hash);
        if let Some(owner) = owner {
            note = note.with_owner(owner);
        }

        let summary = self.store.insert(note).await?;
        tracing::info!(id = summary.id, "note created");
        Ok(summary)
    }

    /// Decrypt a stored note.
    ///
    /// # Errors
    ///
    /// - `NotesError::Validation` if `passphrase` is empty
    /// - `NotesError::NotFound` if no note has this id
    /// - `NotesError::Unauthorized` if the passphrase does not match the verifier
    /// - `NotesError::Crypto` if the stored blob is corrupt
    /// - `NotesError::CorruptRow` if the stored row does not parse
    /// - `NotesError::Storage` / `NotesError::Sqlite` if the lookup fails
    pub async fn decrypt(&self, id: i64, passphrase: &str) -> Result<String> {
        validate_passphrase(passphrase)?;

        let note = self
            .store
            .get(id)
            .await?
            .ok_or(NotesError::NotFound(id))?;

        if !crypto::verify(passphrase, &note.key_hash) {
            tracing::warn!(id, "passphrase rejected");
            return Err(NotesError::Unauthorized);
        }

        let plaintext = crypto::decrypt(&note.encrypted_content, passphrase).map_err(|e| {
            tracing::error!(id, error = %e, "stored note failed to decrypt");
            e
        })?;

        String::from_utf8(plaintext).map_err(|_| {
            tracing::error!(id, "stored note decrypted to invalid UTF-8");
            NotesError::Crypto(CryptoError::InvalidPlaintext)
        })
    }

    /// List note ids and timestamps, newest first.
    pub async fn list(&self, filter: &NoteFilter) -> Result<Vec<NoteSummary>> {
        self.store.scan(filter).await
    }

    /// Check that the underlying store is reachable.
    pub async fn health(&self) -> Result<()> {
        self.store.ping().await
    }
}
