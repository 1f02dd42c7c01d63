//! Performer database queries.

use chrono::Utc;
use rusqlite::{params_from_iter, Connection, Row};
use scrapeforged_common::{Error, PerformerId, Result};

use super::{id_column, placeholders, timestamp_column};
use crate::models::Performer;

fn row_to_performer(row: &Row<'_>) -> rusqlite::Result<Performer> {
    Ok(Performer {
        id: id_column(row, 0)?,
        name: row.get(1)?,
        disambiguation: row.get(2)?,
        created_at: timestamp_column(row, 3)?,
    })
}

/// Create a new performer.
///
/// Performer names are not unique: two performers may share a name and be
/// told apart by `disambiguation`.
pub fn create(conn: &Connection, name: &str, disambiguation: Option<&str>) -> Result<Performer> {
    let performer = Performer {
        id: PerformerId::new(),
        name: name.to_string(),
        disambiguation: disambiguation.map(str::to_string),
        created_at: Utc::now(),
    };

    conn.execute(
        "INSERT INTO performers (id, name, disambiguation, created_at)
         VALUES (:id, :name, :disambiguation, :created_at)",
        rusqlite::named_params! {
            ":id": performer.id.to_string(),
            ":name": performer.name,
            ":disambiguation": performer.disambiguation,
            ":created_at": performer.created_at.to_rfc3339(),
        },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(performer)
}

/// Find every performer whose name exactly equals one of `names`.
///
/// Results are ordered by name and then creation time. An empty `names`
/// slice returns an empty list without touching the database.
pub fn find_by_names(conn: &Connection, names: &[String]) -> Result<Vec<Performer>> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT id, name, disambiguation, created_at FROM performers
         WHERE name IN ({}) ORDER BY name, created_at",
        placeholders(names.len())
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| Error::database(e.to_string()))?;

    let performers = stmt
        .query_map(params_from_iter(names.iter()), row_to_performer)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(performers)
}
