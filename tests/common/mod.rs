//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which owns a temporary scrapers directory and an
//! in-memory catalog, and builds a [`Dispatcher`] over both.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use scrapeforged::catalog::SqliteCatalog;
use scrapeforged::dispatch::Dispatcher;
use scrapeforged::scraper::ScraperRegistry;
use scrapeforged_db::pool::{init_memory_pool, DbPool};
use scrapeforged_db::queries::{movies, performers, studios, tags};
use tempfile::TempDir;

pub struct TestHarness {
    pub dir: TempDir,
    pub db: DbPool,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create scrapers dir"),
            db: init_memory_pool().expect("failed to create in-memory pool"),
        }
    }

    pub fn scrapers_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Write a definition file `<id>.toml`.
    pub fn definition(&self, id: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(format!("{id}.toml"));
        fs::write(&path, content).expect("failed to write definition");
        path
    }

    /// Write a shell script next to the definitions.
    pub fn script(&self, file: &str, body: &str) {
        fs::write(self.dir.path().join(file), body).expect("failed to write script");
    }

    /// Seed the catalog with a fixed set of records.
    ///
    /// "Jane Doe" and "Summer Trip" are unique; "Alex" exists twice.
    pub fn seed_catalog(&self) {
        let conn = self.db.get().unwrap();
        performers::create(&conn, "Jane Doe", None).unwrap();
        performers::create(&conn, "Alex", Some("one")).unwrap();
        performers::create(&conn, "Alex", Some("two")).unwrap();
        movies::create(&conn, "Summer Trip", Some("2021-07-01")).unwrap();
        studios::create(&conn, "Acme", None).unwrap();
        tags::create(&conn, "Outdoor").unwrap();
    }

    pub fn registry(&self) -> ScraperRegistry {
        ScraperRegistry::new(self.dir.path())
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(
            Arc::new(self.registry()),
            Arc::new(SqliteCatalog::new(self.db.clone())),
        )
    }
}

/// Script printing a scene featuring catalog and unknown references.
pub const SCENE_SCRIPT: &str = r#"cat > /dev/null
cat <<'JSON'
{
  "title": "Beach Day",
  "url": "https://example.com/scenes/1",
  "studio": {"name": "Acme"},
  "movies": [{"name": "Summer Trip"}],
  "tags": [{"name": "Outdoor"}, {"name": "Indoor"}],
  "performers": [{"name": "Jane Doe"}, {"name": "Alex"}, {"name": "Nobody"}]
}
JSON
"#;

/// Script answering a name search with the query wrapped in a list.
pub const SEARCH_SCRIPT: &str = r#"printf '['
cat
printf ']'
"#;

/// Definition with URL scene scraping and name search backed by scripts.
pub const EXAMPLE_DEFINITION: &str = r#"
name = "Example"

[performer_by_name]
action = "script"
command = ["sh", "search.sh"]

[[scene_by_url]]
action = "script"
url = ["example.com/scenes/"]
command = ["sh", "scene.sh"]
"#;
