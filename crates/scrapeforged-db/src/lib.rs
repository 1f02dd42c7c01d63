//! Scrapeforged-DB: Catalog schema, migrations, and name lookups
//!
//! This crate stores the catalog that scraped names are reconciled against,
//! using SQLite with rusqlite and r2d2 connection pooling.
//!
//! # Modules
//!
//! - `migrations` - Database schema migrations
//! - `pool` - Connection pool management
//! - `models` - Rust models matching database schema
//! - `queries` - Insert and lookup-by-name operations
//!
//! # Example
//!
//! ```no_run
//! use scrapeforged_db::pool::{init_pool, get_conn};
//! use scrapeforged_db::queries::performers;
//!
//! let pool = init_pool("/var/lib/scrapeforged/catalog.sqlite").unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! let found = performers::find_by_names(&conn, &["Jane Doe".to_string()]).unwrap();
//! println!("{} performer(s) named Jane Doe", found.len());
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
