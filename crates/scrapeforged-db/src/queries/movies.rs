//! Movie database queries.

use chrono::Utc;
use rusqlite::{params_from_iter, Connection, Row};
use scrapeforged_common::{Error, MovieId, Result};

use super::{id_column, placeholders, timestamp_column};
use crate::models::Movie;

fn row_to_movie(row: &Row<'_>) -> rusqlite::Result<Movie> {
    Ok(Movie {
        id: id_column(row, 0)?,
        name: row.get(1)?,
        date: row.get(2)?,
        created_at: timestamp_column(row, 3)?,
    })
}

/// Create a new movie. Movie names are not unique.
pub fn create(conn: &Connection, name: &str, date: Option<&str>) -> Result<Movie> {
    let movie = Movie {
        id: MovieId::new(),
        name: name.to_string(),
        date: date.map(str::to_string),
        created_at: Utc::now(),
    };

    conn.execute(
        "INSERT INTO movies (id, name, date, created_at)
         VALUES (:id, :name, :date, :created_at)",
        rusqlite::named_params! {
            ":id": movie.id.to_string(),
            ":name": movie.name,
            ":date": movie.date,
            ":created_at": movie.created_at.to_rfc3339(),
        },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(movie)
}

/// Find every movie whose name exactly equals one of `names`.
pub fn find_by_names(conn: &Connection, names: &[String]) -> Result<Vec<Movie>> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT id, name, date, created_at FROM movies
         WHERE name IN ({}) ORDER BY name, created_at",
        placeholders(names.len())
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| Error::database(e.to_string()))?;

    let movies = stmt
        .query_map(params_from_iter(names.iter()), row_to_movie)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::init_memory_pool;

    #[test]
    fn test_create_and_find() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        let movie = create(&conn, "Summer Trip", Some("2019-06-01")).unwrap();

        let found = find_by_names(&conn, &["Summer Trip".to_string()]).unwrap();
        assert_eq!(found, vec![movie]);
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        create(&conn, "Summer Trip", Some("2019-06-01")).unwrap();
        create(&conn, "Summer Trip", Some("2021-06-01")).unwrap();

        let found = find_by_names(&conn, &["Summer Trip".to_string()]).unwrap();
        assert_eq!(found.len(), 2);
    }
}
