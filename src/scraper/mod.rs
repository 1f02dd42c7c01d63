//! Scrapers and the registry that owns them.
//!
//! # Module layout
//!
//! - [`provider`] -- The [`Scraper`] trait and capability set.
//! - [`types`] -- Scraped performers, scenes and the references they carry.
//! - [`registry`] -- Lazily loaded, cached collection of scrapers.
//! - [`definition`] -- Scrapers built from TOML definition files.
//! - [`script`] -- External script execution used by definitions.
//! - [`builtin`] -- The always-present filename scraper.
//! - [`url`] -- URL patterns used for routing.

pub mod builtin;
pub mod definition;
pub mod provider;
pub mod registry;
pub mod script;
pub mod types;
pub mod url;

pub use builtin::{FilenameScraper, BUILTIN_ID};
pub use definition::{load_definition, DefinitionScraper, ScraperDefinition};
pub use provider::{Capabilities, Capability, Scraper};
pub use registry::{LoadReport, ScraperRegistry, DEFAULT_SCRIPT_TIMEOUT};
pub use types::*;
pub use url::UrlPattern;
