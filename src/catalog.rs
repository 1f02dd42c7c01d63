//! Catalog access used to reconcile scraped names with existing records.
//!
//! The [`Catalog`] trait is the only view of the catalog the scraping core
//! needs: exact-name lookups returning record identifiers. [`SqliteCatalog`]
//! implements it on top of the `scrapeforged-db` connection pool.

use scrapeforged_common::Result;
use scrapeforged_db::pool::{get_conn, DbPool};
use scrapeforged_db::queries::{movies, performers, studios, tags};

/// A catalog record as seen by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    /// Stringified record identifier.
    pub id: String,
    pub name: String,
}

/// Read-only name lookups against the catalog.
///
/// Performers and movies may share names, so their lookups return every
/// match. Studio and tag names are unique and return at most one record.
pub trait Catalog: Send + Sync {
    fn find_performers_by_names(&self, names: &[String]) -> Result<Vec<CatalogRecord>>;

    fn find_studio_by_name(&self, name: &str) -> Result<Option<CatalogRecord>>;

    fn find_movies_by_names(&self, names: &[String]) -> Result<Vec<CatalogRecord>>;

    fn find_tag_by_name(&self, name: &str) -> Result<Option<CatalogRecord>>;
}

/// [`Catalog`] backed by the SQLite catalog database.
#[derive(Clone)]
pub struct SqliteCatalog {
    pool: DbPool,
}

impl SqliteCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl Catalog for SqliteCatalog {
    fn find_performers_by_names(&self, names: &[String]) -> Result<Vec<CatalogRecord>> {
        let conn = get_conn(&self.pool)?;
        Ok(performers::find_by_names(&conn, names)?
            .into_iter()
            .map(|p| CatalogRecord {
                id: p.id.to_string(),
                name: p.name,
            })
            .collect())
    }

    fn find_studio_by_name(&self, name: &str) -> Result<Option<CatalogRecord>> {
        let conn = get_conn(&self.pool)?;
        Ok(studios::find_by_name(&conn, name)?.map(|s| CatalogRecord {
            id: s.id.to_string(),
            name: s.name,
        }))
    }

    fn find_movies_by_names(&self, names: &[String]) -> Result<Vec<CatalogRecord>> {
        let conn = get_conn(&self.pool)?;
        Ok(movies::find_by_names(&conn, names)?
            .into_iter()
            .map(|m| CatalogRecord {
                id: m.id.to_string(),
                name: m.name,
            })
            .collect())
    }

    fn find_tag_by_name(&self, name: &str) -> Result<Option<CatalogRecord>> {
        let conn = get_conn(&self.pool)?;
        Ok(tags::find_by_name(&conn, name)?.map(|t| CatalogRecord {
            id: t.id.to_string(),
            name: t.name,
        }))
    }
}
