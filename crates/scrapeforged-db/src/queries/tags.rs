//! Tag database queries.

use chrono::Utc;
use rusqlite::{Connection, Row};
use scrapeforged_common::{Error, Result, TagId};

use super::{id_column, timestamp_column};
use crate::models::Tag;

fn row_to_tag(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: id_column(row, 0)?,
        name: row.get(1)?,
        created_at: timestamp_column(row, 2)?,
    })
}

/// Create a new tag. Fails with `Error::InvalidInput` on a duplicate name.
pub fn create(conn: &Connection, name: &str) -> Result<Tag> {
    let tag = Tag {
        id: TagId::new(),
        name: name.to_string(),
        created_at: Utc::now(),
    };

    conn.execute(
        "INSERT INTO tags (id, name, created_at) VALUES (:id, :name, :created_at)",
        rusqlite::named_params! {
            ":id": tag.id.to_string(),
            ":name": tag.name,
            ":created_at": tag.created_at.to_rfc3339(),
        },
    )
    .map_err(|e| match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Error::invalid_input(format!("Tag '{}' already exists", name))
        }
        e => Error::database(e.to_string()),
    })?;

    Ok(tag)
}

/// Find the tag with exactly this name.
pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Tag>> {
    let result = conn.query_row(
        "SELECT id, name, created_at FROM tags WHERE name = :name",
        rusqlite::named_params! { ":name": name },
        row_to_tag,
    );

    match result {
        Ok(tag) => Ok(Some(tag)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}
