//! Trait definition and capability set for scrapers.
//!
//! This module defines the [`Scraper`] trait that every scraper (the built-in
//! one and those loaded from definition files) implements, along with the
//! [`Capabilities`] bitset callers use to ask what a scraper can do without
//! probing its methods.

use std::fmt;

use async_trait::async_trait;

use super::types::{
    ScrapeType, ScrapedPerformer, ScrapedPerformerInput, ScrapedScene, SceneInput, ScraperSpec,
    ScraperSummary,
};
use super::url::UrlPattern;

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// A single operation a scraper may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Search performers by name.
    PerformerSearch,
    /// Complete a performer from a fragment.
    PerformerScrape,
    /// Complete a scene from a fragment.
    SceneScrape,
    /// Scrape a performer page by URL.
    PerformerUrl,
    /// Scrape a scene page by URL.
    SceneUrl,
}

impl Capability {
    pub const ALL: [Capability; 5] = [
        Capability::PerformerSearch,
        Capability::PerformerScrape,
        Capability::SceneScrape,
        Capability::PerformerUrl,
        Capability::SceneUrl,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::PerformerSearch => 1 << 0,
            Self::PerformerScrape => 1 << 1,
            Self::SceneScrape => 1 << 2,
            Self::PerformerUrl => 1 << 3,
            Self::SceneUrl => 1 << 4,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerformerSearch => write!(f, "performer search"),
            Self::PerformerScrape => write!(f, "performer scraping"),
            Self::SceneScrape => write!(f, "scene scraping"),
            Self::PerformerUrl => write!(f, "performer URL scraping"),
            Self::SceneUrl => write!(f, "scene URL scraping"),
        }
    }
}

/// The set of [`Capability`] values a scraper supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability.bit())
    }

    pub fn insert(&mut self, capability: Capability) {
        self.0 |= capability.bit();
    }

    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if any performer operation is supported.
    pub const fn supports_performers(self) -> bool {
        self.contains(Capability::PerformerSearch)
            || self.contains(Capability::PerformerScrape)
            || self.contains(Capability::PerformerUrl)
    }

    /// True if any scene operation is supported.
    pub const fn supports_scenes(self) -> bool {
        self.contains(Capability::SceneScrape) || self.contains(Capability::SceneUrl)
    }

    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

// ---------------------------------------------------------------------------
// Scraper trait
// ---------------------------------------------------------------------------

/// Async trait implemented by every scraper.
///
/// Each scrape method corresponds to one [`Capability`]. A scraper only
/// overrides the methods for the capabilities it reports; the defaults fail
/// with an "unsupported" error. Scrape methods return `Ok(None)` when the
/// scraper ran successfully but found nothing.
///
/// Scrapers are shared across tasks behind an `Arc`.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Stable identifier used to address this scraper.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    fn capabilities(&self) -> Capabilities;

    /// URL patterns routed to [`Scraper::scrape_performer_url`].
    fn performer_url_patterns(&self) -> &[UrlPattern] {
        &[]
    }

    /// URL patterns routed to [`Scraper::scrape_scene_url`].
    fn scene_url_patterns(&self) -> &[UrlPattern] {
        &[]
    }

    fn supports_performers(&self) -> bool {
        self.capabilities().supports_performers()
    }

    fn supports_scenes(&self) -> bool {
        self.capabilities().supports_scenes()
    }

    fn matches_performer_url(&self, url: &str) -> bool {
        self.capabilities().contains(Capability::PerformerUrl)
            && self.performer_url_patterns().iter().any(|p| p.matches(url))
    }

    fn matches_scene_url(&self, url: &str) -> bool {
        self.capabilities().contains(Capability::SceneUrl)
            && self.scene_url_patterns().iter().any(|p| p.matches(url))
    }

    /// Search for performers matching `query`.
    async fn scrape_performer_names(&self, _query: &str) -> anyhow::Result<Vec<ScrapedPerformer>> {
        anyhow::bail!("{} does not support {}", self.id(), Capability::PerformerSearch)
    }

    /// Fetch the full record for a performer fragment.
    async fn scrape_performer(
        &self,
        _input: &ScrapedPerformerInput,
    ) -> anyhow::Result<Option<ScrapedPerformer>> {
        anyhow::bail!("{} does not support {}", self.id(), Capability::PerformerScrape)
    }

    async fn scrape_performer_url(&self, _url: &str) -> anyhow::Result<Option<ScrapedPerformer>> {
        anyhow::bail!("{} does not support {}", self.id(), Capability::PerformerUrl)
    }

    /// Complete a scene from the fragment the caller already has.
    async fn scrape_scene(&self, _input: &SceneInput) -> anyhow::Result<Option<ScrapedScene>> {
        anyhow::bail!("{} does not support {}", self.id(), Capability::SceneScrape)
    }

    async fn scrape_scene_url(&self, _url: &str) -> anyhow::Result<Option<ScrapedScene>> {
        anyhow::bail!("{} does not support {}", self.id(), Capability::SceneUrl)
    }

    /// Summary for listings.
    fn summary(&self) -> ScraperSummary {
        let caps = self.capabilities();

        let performer = caps.supports_performers().then(|| ScraperSpec {
            urls: pattern_strings(self.performer_url_patterns()),
            supported_scrapes: [
                (Capability::PerformerSearch, ScrapeType::Name),
                (Capability::PerformerScrape, ScrapeType::Fragment),
                (Capability::PerformerUrl, ScrapeType::Url),
            ]
            .into_iter()
            .filter(|(c, _)| caps.contains(*c))
            .map(|(_, t)| t)
            .collect(),
        });

        let scene = caps.supports_scenes().then(|| ScraperSpec {
            urls: pattern_strings(self.scene_url_patterns()),
            supported_scrapes: [
                (Capability::SceneScrape, ScrapeType::Fragment),
                (Capability::SceneUrl, ScrapeType::Url),
            ]
            .into_iter()
            .filter(|(c, _)| caps.contains(*c))
            .map(|(_, t)| t)
            .collect(),
        });

        ScraperSummary {
            id: self.id().to_string(),
            name: self.name().to_string(),
            performer,
            scene,
        }
    }
}

fn pattern_strings(patterns: &[UrlPattern]) -> Vec<String> {
    patterns.iter().map(|p| p.as_str().to_string()).collect()
}
