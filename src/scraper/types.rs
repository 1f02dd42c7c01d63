//! Data types exchanged with scrapers.
//!
//! Everything here is serialised as JSON when talking to script scrapers and
//! to HTTP clients, so field names are part of the external contract.

use scrapeforged_common::Gender;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Performers
// ---------------------------------------------------------------------------

/// A performer as extracted by a scraper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapedPerformer {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub url: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub birthdate: Option<String>,
    pub ethnicity: Option<String>,
    pub country: Option<String>,
    pub eye_color: Option<String>,
    pub height: Option<String>,
    pub measurements: Option<String>,
    pub fake_tits: Option<String>,
    pub career_length: Option<String>,
    pub tattoos: Option<String>,
    pub piercings: Option<String>,
    pub aliases: Option<String>,
    /// Image URL or data URI.
    pub image: Option<String>,
}

/// Partial performer sent to a performer-by-fragment scrape.
///
/// Usually one of the entries returned by a name search, sent back so the
/// scraper can fetch the full record.
pub type ScrapedPerformerInput = ScrapedPerformer;

// ---------------------------------------------------------------------------
// Scene references
// ---------------------------------------------------------------------------

/// A performer credited on a scraped scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapedScenePerformer {
    /// Catalog ID, set only when the name matched exactly one performer.
    pub id: Option<String>,
    pub name: String,
    pub gender: Option<Gender>,
    pub url: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub birthdate: Option<String>,
    pub country: Option<String>,
    pub aliases: Option<String>,
}

/// The studio a scraped scene was released by.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapedSceneStudio {
    /// Catalog ID, set only when a studio with this exact name exists.
    pub id: Option<String>,
    pub name: String,
    pub url: Option<String>,
}

/// A movie a scraped scene belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapedSceneMovie {
    /// Catalog ID, set only when the name matched exactly one movie.
    pub id: Option<String>,
    pub name: String,
    pub url: Option<String>,
    pub date: Option<String>,
    pub duration: Option<String>,
    pub synopsis: Option<String>,
}

/// A tag attached to a scraped scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapedSceneTag {
    /// Catalog ID, set only when a tag with this exact name exists.
    pub id: Option<String>,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Scenes
// ---------------------------------------------------------------------------

/// A scene as extracted by a scraper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapedScene {
    pub title: Option<String>,
    pub details: Option<String>,
    pub url: Option<String>,
    /// Release date as `YYYY-MM-DD`.
    pub date: Option<String>,
    pub image: Option<String>,
    pub studio: Option<ScrapedSceneStudio>,
    pub movies: Vec<ScrapedSceneMovie>,
    pub tags: Vec<ScrapedSceneTag>,
    pub performers: Vec<ScrapedScenePerformer>,
}

/// The scene fragment sent to a scene-by-fragment scrape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub details: Option<String>,
    pub url: Option<String>,
    pub date: Option<String>,
    /// Path of the scene's media file.
    pub path: Option<String>,
}

// ---------------------------------------------------------------------------
// Scraper summaries
// ---------------------------------------------------------------------------

/// How a scraper can be invoked for one content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeType {
    /// Search by name, returning a list of candidates.
    Name,
    /// Complete a partial record.
    Fragment,
    /// Scrape from a URL.
    Url,
}

/// Capabilities of a scraper for one content type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperSpec {
    /// URL patterns this scraper claims.
    pub urls: Vec<String>,
    pub supported_scrapes: Vec<ScrapeType>,
}

/// Lightweight description of a scraper for presentation to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperSummary {
    pub id: String,
    pub name: String,
    pub performer: Option<ScraperSpec>,
    pub scene: Option<ScraperSpec>,
}
