//! Database query operations.
//!
//! One module per catalog table. Every table supports creation and exact-name
//! lookup; name comparison uses SQLite's default binary collation, so lookups
//! are case-sensitive.

pub mod movies;
pub mod performers;
pub mod studios;
pub mod tags;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;
use std::str::FromStr;

/// Decode a TEXT column holding a typed UUID.
pub(crate) fn id_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = uuid::Error>,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Decode a TEXT column holding an RFC 3339 timestamp.
pub(crate) fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Build `?, ?, ?` for an `IN (...)` clause with `n` parameters.
pub(crate) fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}
