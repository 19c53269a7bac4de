//! Note store trait definition.
//!
//! The `NoteStore` trait is the persistence contract the service depends on.
//! It knows nothing about encryption: it stores opaque blobs and verifiers
//! and hands them back.

use async_trait::async_trait;

use super::types::{NewNote, Note, NoteFilter, NoteSummary};
use crate::error::Result;

/// Persistence interface for encrypted notes.
///
/// All implementations must ensure:
/// - `id` is assigned on insert, unique, and increasing in insertion order
/// - `created_at` is assigned on insert and never changes
/// - Rows are never updated
///
/// Every method is a suspension point. Failures are reported as
/// `NotesError::Storage` or `NotesError::Sqlite`.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Insert a new note.
    ///
    /// # Returns
    ///
    /// Returns the store-assigned id and creation timestamp.
    async fn insert(&self, note: NewNote) -> Result<NoteSummary>;

    /// Get a note by ID.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(note))` if found, `Ok(None)` if not found.
    async fn get(&self, id: i64) -> Result<Option<Note>>;

    /// List notes matching the filter.
    ///
    /// Notes are returned newest first (`created_at` descending, then `id`
    /// descending for equal timestamps).
    async fn scan(&self, filter: &NoteFilter) -> Result<Vec<NoteSummary>>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<()>;
}
