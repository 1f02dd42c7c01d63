//! Core type definitions shared by scrapers, the catalog and the API.
//!
//! All enums are serialized in lowercase so they round-trip through scraper
//! scripts and query strings unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of content a scrape produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeContentType {
    /// A single performer.
    Performer,
    /// A single scene.
    Scene,
}

impl fmt::Display for ScrapeContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Performer => write!(f, "performer"),
            Self::Scene => write!(f, "scene"),
        }
    }
}

impl FromStr for ScrapeContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "performer" | "performers" => Ok(Self::Performer),
            "scene" | "scenes" => Ok(Self::Scene),
            other => Err(format!("unknown content type: {other}")),
        }
    }
}

/// Performer gender as reported by a scraper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    TransgenderMale,
    TransgenderFemale,
    Intersex,
    NonBinary,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::TransgenderMale => write!(f, "transgender_male"),
            Self::TransgenderFemale => write!(f, "transgender_female"),
            Self::Intersex => write!(f, "intersex"),
            Self::NonBinary => write!(f, "non_binary"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_parse() {
        assert_eq!(
            "performer".parse::<ScrapeContentType>().unwrap(),
            ScrapeContentType::Performer
        );
        assert_eq!(
            "Scenes".parse::<ScrapeContentType>().unwrap(),
            ScrapeContentType::Scene
        );
        assert!("gallery".parse::<ScrapeContentType>().is_err());
    }

    #[test]
    fn test_gender_serde_matches_display() {
        for gender in [Gender::Male, Gender::TransgenderFemale, Gender::NonBinary] {
            let json = serde_json::to_string(&gender).unwrap();
            assert_eq!(json, format!("\"{gender}\""));
        }
    }
}
