//! Built-in scraper that reads scene details from release-style names.
//!
//! Two naming schemes are recognised, checked against the file name of the
//! scene's path first and its title second:
//!
//! - `Studio.YY.MM.DD.Some.Title.1080p.mp4` yields studio, date and title.
//!   Everything from the first quality or encoding token onward is dropped.
//! - `[Studio] Some Title` yields studio and title.

use std::path::Path;
use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;

use super::provider::{Capabilities, Capability, Scraper};
use super::types::{ScrapedScene, ScrapedSceneStudio, SceneInput};

pub const BUILTIN_ID: &str = "builtin_filename";
const BUILTIN_NAME: &str = "Filename parser";

static DATED_RELEASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<studio>[A-Za-z0-9]+)\.(?P<yy>\d{2})\.(?P<mm>\d{2})\.(?P<dd>\d{2})\.(?P<rest>.+)$")
        .unwrap()
});

static BRACKETED_STUDIO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(?P<studio>[^\]]+)\]\s*(?P<rest>.+)$").unwrap());

static TRAILING_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(xxx|\d{3,4}p|4k|uhd|web(-?dl|rip)?|hevc|h\.?26[45]|x26[45]|mp4|mkv|wmv|avi)$")
        .unwrap()
});

/// The built-in scraper. Always registered first.
#[derive(Debug, Default)]
pub struct FilenameScraper;

impl FilenameScraper {
    pub fn new() -> Self {
        Self
    }

    /// Parse a release name, returning `None` when neither scheme matches.
    pub fn parse(name: &str) -> Option<ScrapedScene> {
        let name = name.trim();

        if let Some(caps) = DATED_RELEASE.captures(name) {
            let year = 2000 + caps["yy"].parse::<i32>().ok()?;
            let month = caps["mm"].parse().ok()?;
            let day = caps["dd"].parse().ok()?;
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Some(ScrapedScene {
                    title: title_from_tokens(&caps["rest"]),
                    date: Some(date.format("%Y-%m-%d").to_string()),
                    studio: Some(studio(&caps["studio"])),
                    ..Default::default()
                });
            }
        }

        let caps = BRACKETED_STUDIO.captures(name)?;
        Some(ScrapedScene {
            title: title_from_tokens(&caps["rest"]),
            studio: Some(studio(caps["studio"].trim())),
            ..Default::default()
        })
    }
}

fn studio(name: &str) -> ScrapedSceneStudio {
    ScrapedSceneStudio {
        name: name.to_string(),
        ..Default::default()
    }
}

/// Join separator-delimited tokens into a title, stopping at the first
/// quality or container token.
fn title_from_tokens(rest: &str) -> Option<String> {
    let words: Vec<&str> = rest
        .split(['.', '_', ' '])
        .filter(|t| !t.is_empty())
        .take_while(|t| !TRAILING_TOKEN.is_match(t))
        .collect();

    (!words.is_empty()).then(|| words.join(" "))
}

#[async_trait]
impl Scraper for FilenameScraper {
    fn id(&self) -> &str {
        BUILTIN_ID
    }

    fn name(&self) -> &str {
        BUILTIN_NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::empty().with(Capability::SceneScrape)
    }

    async fn scrape_scene(&self, input: &SceneInput) -> anyhow::Result<Option<ScrapedScene>> {
        let from_path = input
            .path
            .as_deref()
            .and_then(|p| Path::new(p).file_name())
            .and_then(|n| n.to_str())
            .and_then(FilenameScraper::parse);

        let scene = from_path.or_else(|| input.title.as_deref().and_then(FilenameScraper::parse));
        if scene.is_none() {
            tracing::debug!("No release name pattern matched for scene {:?}", input.id);
        }
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dated_release() {
        let scene = FilenameScraper::parse("AcmePictures.21.07.04.Beach.Day.XXX.1080p.MP4-GRP.mp4")
            .unwrap();
        assert_eq!(scene.title.as_deref(), Some("Beach Day"));
        assert_eq!(scene.date.as_deref(), Some("2021-07-04"));
        assert_eq!(scene.studio.unwrap().name, "AcmePictures");
        assert!(scene.performers.is_empty());
    }

    #[test]
    fn invalid_date_falls_through() {
        assert!(FilenameScraper::parse("Acme.21.13.40.Beach.Day").is_none());
    }

    #[test]
    fn parses_bracketed_studio() {
        let scene = FilenameScraper::parse("[Acme Pictures] Beach_Day.mkv").unwrap();
        assert_eq!(scene.title.as_deref(), Some("Beach Day"));
        assert_eq!(scene.studio.unwrap().name, "Acme Pictures");
        assert!(scene.date.is_none());
    }

    #[test]
    fn unrecognised_name() {
        assert!(FilenameScraper::parse("holiday video.mp4").is_none());
    }

    #[tokio::test]
    async fn prefers_path_over_title() {
        let scraper = FilenameScraper::new();
        let input = SceneInput {
            title: Some("[Other] Wrong Title".to_string()),
            path: Some("/media/Acme.20.01.02.Right.Title.mp4".to_string()),
            ..Default::default()
        };

        let scene = scraper.scrape_scene(&input).await.unwrap().unwrap();
        assert_eq!(scene.title.as_deref(), Some("Right Title"));
        assert_eq!(scene.studio.unwrap().name, "Acme");
    }

    #[tokio::test]
    async fn falls_back_to_title() {
        let scraper = FilenameScraper::new();
        let input = SceneInput {
            title: Some("[Acme] Beach Day".to_string()),
            path: Some("/media/holiday.mp4".to_string()),
            ..Default::default()
        };

        let scene = scraper.scrape_scene(&input).await.unwrap().unwrap();
        assert_eq!(scene.title.as_deref(), Some("Beach Day"));
    }

    #[test]
    fn only_scene_scraping() {
        let scraper = FilenameScraper::new();
        assert!(scraper.supports_scenes());
        assert!(!scraper.supports_performers());
        assert!(!scraper.matches_scene_url("https://example.com"));
    }
}
