//! Note row type for database queries.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{NotesError, Result};
use crate::storage::types::{Note, NoteSummary};

/// Raw row data from the notes table, before parsing into domain types.
#[derive(Debug)]
pub struct NoteRow {
    pub id: i64,
    pub encrypted_content: String,
    pub key_hash: String,
    pub created_at: String,
    pub owner: Option<String>,
}

impl TryFrom<NoteRow> for Note {
    type Error = NotesError;

    fn try_from(row: NoteRow) -> Result<Self> {
        Ok(Note {
            id: row.id,
            encrypted_content: row.encrypted_content,
            key_hash: row.key_hash,
            created_at: parse_timestamp(&row.created_at)?,
            owner: row.owner,
        })
    }
}

/// Raw `(id, created_at)` pair from a listing query.
#[derive(Debug)]
pub struct SummaryRow {
    pub id: i64,
    pub created_at: String,
}

impl TryFrom<SummaryRow> for NoteSummary {
    type Error = NotesError;

    fn try_from(row: SummaryRow) -> Result<Self> {
        Ok(NoteSummary {
            id: row.id,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// A bad stored timestamp is row corruption, not a store outage.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(|e| NotesError::CorruptRow(format!("Invalid timestamp: {}", e)))?
        .with_timezone(&Utc))
}
