//! Routing of scrape requests to scrapers.
//!
//! The [`Dispatcher`] picks a scraper from the [`ScraperRegistry`], either by
//! ID or by the first scraper whose URL patterns match, forwards the request,
//! and reconciles scraped scenes against the [`Catalog`] before returning
//! them.

use std::sync::Arc;

use scrapeforged_common::ScrapeContentType;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{Result, ScrapeError};
use crate::reconcile::reconcile_scene;
use crate::scraper::{
    Capability, ScrapedPerformer, ScrapedPerformerInput, ScrapedScene, SceneInput, Scraper,
    ScraperRegistry, ScraperSummary,
};

/// Result of a URL scrape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ScrapedContent {
    Performer(ScrapedPerformer),
    Scene(ScrapedScene),
}

/// Entry point for listing scrapers and running scrapes.
///
/// Cheap to clone; clones share the registry and catalog.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ScraperRegistry>,
    catalog: Arc<dyn Catalog>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ScraperRegistry>, catalog: Arc<dyn Catalog>) -> Self {
        Self { registry, catalog }
    }

    pub fn registry(&self) -> &ScraperRegistry {
        &self.registry
    }

    /// Summaries of scrapers supporting `kind`, built-in first.
    pub fn list_scrapers(&self, kind: ScrapeContentType) -> Result<Vec<ScraperSummary>> {
        match kind {
            ScrapeContentType::Performer => self.list_performer_scrapers(),
            ScrapeContentType::Scene => self.list_scene_scrapers(),
        }
    }

    pub fn list_performer_scrapers(&self) -> Result<Vec<ScraperSummary>> {
        self.registry.list_performer_scrapers()
    }

    pub fn list_scene_scrapers(&self) -> Result<Vec<ScraperSummary>> {
        self.registry.list_scene_scrapers()
    }

    /// Find a scraper by ID. The first scraper with that ID wins.
    pub fn find_by_id(&self, id: &str) -> Result<Option<Arc<dyn Scraper>>> {
        self.registry.get(id)
    }

    fn require(&self, id: &str, capability: Capability) -> Result<Arc<dyn Scraper>> {
        let scraper = self
            .find_by_id(id)?
            .ok_or_else(|| ScrapeError::NotFound(id.to_string()))?;

        if !scraper.capabilities().contains(capability) {
            return Err(ScrapeError::Unsupported {
                id: id.to_string(),
                capability,
            });
        }

        Ok(scraper)
    }

    /// Search performers by name with the scraper `id`.
    pub async fn scrape_performer_list(
        &self,
        id: &str,
        query: &str,
    ) -> Result<Vec<ScrapedPerformer>> {
        let scraper = self.require(id, Capability::PerformerSearch)?;
        scraper
            .scrape_performer_names(query)
            .await
            .map_err(ScrapeError::Scraper)
    }

    /// Complete a performer fragment with the scraper `id`.
    pub async fn scrape_performer(
        &self,
        id: &str,
        input: &ScrapedPerformerInput,
    ) -> Result<Option<ScrapedPerformer>> {
        let scraper = self.require(id, Capability::PerformerScrape)?;
        scraper
            .scrape_performer(input)
            .await
            .map_err(ScrapeError::Scraper)
    }

    /// Scrape a performer page with the first scraper claiming `url`.
    ///
    /// Returns `Ok(None)` when no scraper claims the URL.
    pub async fn scrape_performer_url(&self, url: &str) -> Result<Option<ScrapedPerformer>> {
        let Some(scraper) = self.first_matching(url, |s| s.matches_performer_url(url))? else {
            return Ok(None);
        };

        scraper
            .scrape_performer_url(url)
            .await
            .map_err(ScrapeError::Scraper)
    }

    /// Complete a scene fragment with the scraper `id` and reconcile the
    /// result against the catalog.
    pub async fn scrape_scene(&self, id: &str, input: &SceneInput) -> Result<Option<ScrapedScene>> {
        let scraper = self.require(id, Capability::SceneScrape)?;
        let scene = scraper
            .scrape_scene(input)
            .await
            .map_err(ScrapeError::Scraper)?;

        self.post_scrape_scene(scene)
    }

    /// Scrape a scene page with the first scraper claiming `url` and
    /// reconcile the result against the catalog.
    ///
    /// Returns `Ok(None)` when no scraper claims the URL.
    pub async fn scrape_scene_url(&self, url: &str) -> Result<Option<ScrapedScene>> {
        let Some(scraper) = self.first_matching(url, |s| s.matches_scene_url(url))? else {
            return Ok(None);
        };

        let scene = scraper
            .scrape_scene_url(url)
            .await
            .map_err(ScrapeError::Scraper)?;

        self.post_scrape_scene(scene)
    }

    /// Scrape `url` as `kind`.
    pub async fn scrape_url(
        &self,
        url: &str,
        kind: ScrapeContentType,
    ) -> Result<Option<ScrapedContent>> {
        Ok(match kind {
            ScrapeContentType::Performer => self
                .scrape_performer_url(url)
                .await?
                .map(ScrapedContent::Performer),
            ScrapeContentType::Scene => self
                .scrape_scene_url(url)
                .await?
                .map(ScrapedContent::Scene),
        })
    }

    fn first_matching<F>(&self, url: &str, matches: F) -> Result<Option<Arc<dyn Scraper>>>
    where
        F: Fn(&dyn Scraper) -> bool,
    {
        let found = self
            .registry
            .scrapers()?
            .iter()
            .find(|s| matches(s.as_ref()))
            .cloned();

        match &found {
            Some(scraper) => tracing::debug!("Routing {} to scraper {}", url, scraper.id()),
            None => tracing::debug!("No scraper claims {}", url),
        }

        Ok(found)
    }

    fn post_scrape_scene(&self, scene: Option<ScrapedScene>) -> Result<Option<ScrapedScene>> {
        let Some(mut scene) = scene else {
            return Ok(None);
        };
        reconcile_scene(self.catalog.as_ref(), &mut scene)?;
        Ok(Some(scene))
    }
}
