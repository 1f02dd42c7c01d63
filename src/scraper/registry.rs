//! Scraper registry.
//!
//! The [`ScraperRegistry`] owns every scraper for its lifetime: the built-in
//! scraper, any registered programmatically, and those read from definition
//! files in the scrapers directory. Definitions are read lazily on first use
//! and cached; later calls see the same snapshot.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use parking_lot::Mutex;
use walkdir::WalkDir;

use super::builtin::FilenameScraper;
use super::definition::{load_definition, DEFINITION_EXTENSION};
use super::provider::Scraper;
use super::types::ScraperSummary;
use crate::error::{DefinitionError, Result, ScrapeError};

/// Default timeout for script actions that do not set their own.
pub const DEFAULT_SCRIPT_TIMEOUT: Duration = Duration::from_secs(60);

/// Outcome of loading the registry.
///
/// Definition files that failed to load are reported in `failures` instead
/// of failing the load.
#[derive(Clone, Default)]
pub struct LoadReport {
    pub scrapers: Vec<Arc<dyn Scraper>>,
    pub failures: Vec<DefinitionError>,
}

/// A registry of scrapers.
///
/// Scrapers are kept in registry order: the built-in scraper first, then
/// registered scrapers in registration order, then definition files sorted
/// by path.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use scrapeforged::scraper::ScraperRegistry;
///
/// let registry = Arc::new(ScraperRegistry::new("/etc/scrapeforged/scrapers"));
/// for summary in registry.list_scene_scrapers()? {
///     println!("{} ({})", summary.name, summary.id);
/// }
/// ```
pub struct ScraperRegistry {
    directory: Option<PathBuf>,
    script_timeout: Duration,
    builtin: Arc<dyn Scraper>,
    registered: Vec<Arc<dyn Scraper>>,
    loaded: OnceLock<LoadReport>,
    load_lock: Mutex<()>,
}

impl ScraperRegistry {
    /// Create a registry reading definitions from `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
            ..Self::builtin_only()
        }
    }

    /// Create a registry with only the built-in scraper and whatever is
    /// registered before first use.
    pub fn builtin_only() -> Self {
        Self {
            directory: None,
            script_timeout: DEFAULT_SCRIPT_TIMEOUT,
            builtin: Arc::new(FilenameScraper::new()),
            registered: Vec::new(),
            loaded: OnceLock::new(),
            load_lock: Mutex::new(()),
        }
    }

    /// Set the timeout for script actions without their own `timeout_secs`.
    #[must_use]
    pub fn with_script_timeout(mut self, timeout: Duration) -> Self {
        self.script_timeout = timeout;
        self
    }

    /// Register a scraper ahead of the definition files.
    ///
    /// Has no effect on a registry that has already loaded.
    pub fn register(&mut self, scraper: Arc<dyn Scraper>) {
        if self.loaded.get().is_some() {
            tracing::warn!(
                "Ignoring registration of {} after the registry was loaded",
                scraper.id()
            );
            return;
        }
        self.registered.push(scraper);
    }

    /// Load the registry, or return the cached snapshot.
    ///
    /// Only one caller performs the load; concurrent first callers wait for
    /// it and then share its result. If the scrapers directory cannot be
    /// enumerated the error is returned and nothing is cached.
    pub fn load(&self) -> Result<&LoadReport> {
        if let Some(report) = self.loaded.get() {
            return Ok(report);
        }

        let _guard = self.load_lock.lock();
        if let Some(report) = self.loaded.get() {
            return Ok(report);
        }

        let report = self.read_scrapers()?;
        tracing::info!(
            "Loaded {} scrapers ({} definition files failed)",
            report.scrapers.len(),
            report.failures.len()
        );

        Ok(self.loaded.get_or_init(|| report))
    }

    /// All scrapers, in registry order.
    pub fn scrapers(&self) -> Result<&[Arc<dyn Scraper>]> {
        Ok(&self.load()?.scrapers)
    }

    /// Definition files that failed to load.
    pub fn failures(&self) -> Result<&[DefinitionError]> {
        Ok(&self.load()?.failures)
    }

    /// Look up a scraper by ID.
    ///
    /// IDs are expected to be unique; if two scrapers share one, the first in
    /// registry order wins.
    pub fn get(&self, id: &str) -> Result<Option<Arc<dyn Scraper>>> {
        Ok(self.scrapers()?.iter().find(|s| s.id() == id).cloned())
    }

    /// Summaries of every scraper accepted by `predicate`, in registry order.
    pub fn list_by_capability<F>(&self, predicate: F) -> Result<Vec<ScraperSummary>>
    where
        F: Fn(&dyn Scraper) -> bool,
    {
        Ok(self
            .scrapers()?
            .iter()
            .filter(|s| predicate(s.as_ref()))
            .map(|s| s.summary())
            .collect())
    }

    pub fn list_performer_scrapers(&self) -> Result<Vec<ScraperSummary>> {
        self.list_by_capability(|s| s.supports_performers())
    }

    pub fn list_scene_scrapers(&self) -> Result<Vec<ScraperSummary>> {
        self.list_by_capability(|s| s.supports_scenes())
    }

    fn read_scrapers(&self) -> Result<LoadReport> {
        let mut report = LoadReport {
            scrapers: vec![self.builtin.clone()],
            failures: Vec::new(),
        };
        report.scrapers.extend(self.registered.iter().cloned());

        let Some(directory) = &self.directory else {
            return Ok(report);
        };

        tracing::debug!("Reading scraper definitions from {:?}", directory);

        for candidate in enumerate_definitions(directory)? {
            match candidate.and_then(|path| load_definition(&path, self.script_timeout)) {
                Ok(scraper) => {
                    tracing::debug!("Loaded scraper {} ({})", scraper.id(), scraper.name());
                    report.scrapers.push(Arc::new(scraper));
                }
                Err(e) => {
                    tracing::warn!("Error loading scraper {}", e);
                    report.failures.push(e);
                }
            }
        }

        Ok(report)
    }
}

impl Default for ScraperRegistry {
    fn default() -> Self {
        Self::builtin_only()
    }
}

/// List definition files below `directory`, sorted by path.
///
/// A missing directory yields no files. An unreadable directory is an error;
/// unreadable entries below it are reported per entry.
fn enumerate_definitions(
    directory: &Path,
) -> Result<Vec<std::result::Result<PathBuf, DefinitionError>>> {
    let load_error = |source: std::io::Error| ScrapeError::RegistryLoad {
        path: directory.to_path_buf(),
        source,
    };

    match std::fs::metadata(directory) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(load_error(std::io::Error::other("not a directory")));
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("Scrapers directory {:?} does not exist", directory);
            return Ok(Vec::new());
        }
        Err(e) => return Err(load_error(e)),
    }

    let mut candidates = Vec::new();
    for entry in WalkDir::new(directory)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if entry.file_type().is_file()
                    && path.extension().and_then(|e| e.to_str()) == Some(DEFINITION_EXTENSION)
                {
                    candidates.push(Ok(path.to_path_buf()));
                }
            }
            Err(e) if e.depth() == 0 => {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("failed to read directory"));
                return Err(load_error(source));
            }
            Err(e) => {
                let path = e.path().unwrap_or(directory).to_path_buf();
                candidates.push(Err(DefinitionError {
                    path,
                    reason: e.to_string(),
                }));
            }
        }
    }

    Ok(candidates)
}
