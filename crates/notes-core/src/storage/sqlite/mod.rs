//! SQLite note store.
//!
//! This module provides a `NoteStore` backed by a single SQLite connection.
//! Rows hold ciphertext and verifiers only; the store never sees a passphrase.
//! Queries run on tokio's blocking pool so callers can `.await` them from
//! request handlers.

mod row;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use rusqlite::{Connection, OptionalExtension};

use crate::error::{NotesError, Result};
use crate::storage::traits::NoteStore;
use crate::storage::types::{NewNote, Note, NoteFilter, NoteSummary};

use row::{format_timestamp, NoteRow, SummaryRow};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS notes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        encrypted_content TEXT NOT NULL,
        key_hash TEXT NOT NULL,
        created_at TEXT NOT NULL,
        owner TEXT
    );

    CREATE INDEX IF NOT EXISTS notes_created_at ON notes (created_at DESC, id DESC);
    CREATE INDEX IF NOT EXISTS notes_owner ON notes (owner);
"#;

/// SQLite-backed note store.
///
/// Cloning is not supported; share it behind the service that owns it.
pub struct SqliteNoteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteNoteStore {
    /// Open (or create) a note database at `path`.
    ///
    /// The schema is created if it does not exist yet.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
        Self::init(conn)
    }

    /// Open a private in-memory database. Contents are lost on close.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        tracing::debug!("note store schema ready");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Close the store, releasing the connection.
    ///
    /// # Errors
    ///
    /// Returns `NotesError::Storage` if a query is still in flight or SQLite
    /// refuses to close.
    pub fn close(self) -> Result<()> {
        let mutex = Arc::try_unwrap(self.conn)
            .map_err(|_| NotesError::Storage("Note store still in use".to_string()))?;
        let conn = mutex
            .into_inner()
            .map_err(|_| NotesError::Storage("SQLite connection poisoned".to_string()))?;
        conn.close().map_err(|(_, e)| NotesError::from(e))?;
        tracing::debug!("note store closed");
        Ok(())
    }

    /// Delete every note. Test environments only; the service never calls this.
    ///
    /// # Returns
    ///
    /// Returns the number of rows removed.
    pub async fn purge(&self) -> Result<usize> {
        let removed = self
            .with_conn(|conn| Ok(conn.execute("DELETE FROM notes", [])?))
            .await?;
        tracing::info!(removed, "purged notes");
        Ok(removed)
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = lock_conn(&conn)?;
            f(&mut guard)
        })
        .await
        .map_err(|e| NotesError::Storage(format!("Store task failed: {}", e)))?
    }
}

/// Lock the database connection, returning an error if the mutex is poisoned.
fn lock_conn(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|_| NotesError::Storage("SQLite connection poisoned".to_string()))
}

#[async_trait]
impl NoteStore for SqliteNoteStore {
    async fn insert(&self, note: NewNote) -> Result<NoteSummary> {
        let summary = self
            .with_conn(move |conn| {
                // Stored at microsecond precision; truncate so the returned
                // value equals what a later read yields.
                let created_at = Utc::now().trunc_subsecs(6);
                conn.execute(
                    r#"
                    INSERT INTO notes (encrypted_content, key_hash, created_at, owner)
                    VALUES (?, ?, ?, ?)
                    "#,
                    (
                        &note.encrypted_content,
                        &note.key_hash,
                        format_timestamp(&created_at),
                        &note.owner,
                    ),
                )?;
                Ok(NoteSummary {
                    id: conn.last_insert_rowid(),
                    created_at,
                })
            })
            .await?;

        tracing::debug!(id = summary.id, "note inserted");
        Ok(summary)
    }

    async fn get(&self, id: i64) -> Result<Option<Note>> {
        let row = self
            .with_conn(move |conn| {
                Ok(conn
                    .query_row(
                        r#"
                        SELECT id, encrypted_content, key_hash, created_at, owner
                        FROM notes
                        WHERE id = ?
                        "#,
                        [id],
                        |row| {
                            Ok(NoteRow {
                                id: row.get(0)?,
                                encrypted_content: row.get(1)?,
                                key_hash: row.get(2)?,
                                created_at: row.get(3)?,
                                owner: row.get(4)?,
                            })
                        },
                    )
                    .optional()?)
            })
            .await?;

        row.map(Note::try_from).transpose()
    }

    async fn scan(&self, filter: &NoteFilter) -> Result<Vec<NoteSummary>> {
        let filter = filter.clone();
        let rows = self
            .with_conn(move |conn| {
                let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

                let mut query = String::from("SELECT id, created_at FROM notes");
                if let Some(owner) = filter.owner {
                    query.push_str(" WHERE owner = ?");
                    params.push(Box::new(owner));
                }
                query.push_str(" ORDER BY created_at DESC, id DESC");

                if let Some(limit) = filter.limit {
                    query.push_str(" LIMIT ?");
                    params.push(Box::new(i64::try_from(limit).unwrap_or(i64::MAX)));
                }

                let mut stmt = conn.prepare(&query)?;
                let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
                    Ok(SummaryRow {
                        id: row.get(0)?,
                        created_at: row.get(1)?,
                    })
                })?;

                let mut collected = Vec::new();
                for row in rows {
                    collected.push(row?);
                }
                Ok(collected)
            })
            .await?;

        rows.into_iter().map(NoteSummary::try_from).collect()
    }

    async fn ping(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
    }
}
