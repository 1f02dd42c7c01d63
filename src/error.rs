//! Error types for scraper loading, dispatch and reconciliation.

use std::path::PathBuf;

use crate::scraper::Capability;

/// Errors returned to callers of the registry and dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The scrapers directory could not be enumerated. The registry stays
    /// unloaded and the next call retries.
    #[error("Failed to read scrapers from {}: {source}", path.display())]
    RegistryLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No scraper has the requested ID.
    #[error("Scraper with ID {0} not found")]
    NotFound(String),

    /// The scraper exists but does not offer the requested operation.
    #[error("Scraper {id} does not support {capability}")]
    Unsupported { id: String, capability: Capability },

    /// A catalog lookup failed while reconciling a scrape result.
    #[error("Catalog lookup failed: {0}")]
    Catalog(#[from] scrapeforged_common::Error),

    /// The scraper itself failed.
    #[error(transparent)]
    Scraper(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// A definition file that could not be turned into a scraper.
///
/// These are collected during registry load and never fail the load itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}: {reason}", path.display())]
pub struct DefinitionError {
    pub path: PathBuf,
    pub reason: String,
}
