//! Scrapeforged-Common: Shared types, IDs, and errors.
//!
//! This crate provides common functionality used across scrapeforged:
//!
//! - **Typed IDs**: Type-safe UUID wrappers for catalog performers, studios, movies and tags
//! - **Core Types**: Enums for scrape content types and performer gender
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use scrapeforged_common::{PerformerId, ScrapeContentType, Error, Result};
//!
//! let performer_id = PerformerId::new();
//! let kind: ScrapeContentType = "scene".parse().unwrap();
//!
//! fn example() -> Result<()> {
//!     Err(Error::database("catalog offline"))
//! }
//! ```

pub mod error;
pub mod ids;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
