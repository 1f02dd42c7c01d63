//! Studio database queries.

use chrono::Utc;
use rusqlite::{Connection, Row};
use scrapeforged_common::{Error, Result, StudioId};

use super::{id_column, timestamp_column};
use crate::models::Studio;

fn row_to_studio(row: &Row<'_>) -> rusqlite::Result<Studio> {
    Ok(Studio {
        id: id_column(row, 0)?,
        name: row.get(1)?,
        url: row.get(2)?,
        created_at: timestamp_column(row, 3)?,
    })
}

/// Create a new studio.
///
/// Returns `Err(Error::InvalidInput)` when a studio with the same name
/// already exists.
pub fn create(conn: &Connection, name: &str, url: Option<&str>) -> Result<Studio> {
    let studio = Studio {
        id: StudioId::new(),
        name: name.to_string(),
        url: url.map(str::to_string),
        created_at: Utc::now(),
    };

    conn.execute(
        "INSERT INTO studios (id, name, url, created_at)
         VALUES (:id, :name, :url, :created_at)",
        rusqlite::named_params! {
            ":id": studio.id.to_string(),
            ":name": studio.name,
            ":url": studio.url,
            ":created_at": studio.created_at.to_rfc3339(),
        },
    )
    .map_err(|e| match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Error::invalid_input(format!("Studio '{}' already exists", name))
        }
        e => Error::database(e.to_string()),
    })?;

    Ok(studio)
}

/// Find the studio with exactly this name.
///
/// # Returns
///
/// * `Ok(Some(Studio))` - The studio if found
/// * `Ok(None)` - If no studio has that name
/// * `Err(Error)` - If a database error occurs
pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Studio>> {
    let result = conn.query_row(
        "SELECT id, name, url, created_at FROM studios WHERE name = :name",
        rusqlite::named_params! { ":name": name },
        row_to_studio,
    );

    match result {
        Ok(studio) => Ok(Some(studio)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}
