//! URL patterns claimed by scrapers.
//!
//! A pattern matches when it occurs anywhere in the URL, so `example.com`
//! claims every page on that site. A `*` inside a pattern matches any run of
//! characters: `example.com/performers/*` claims performer pages only, and a
//! bare `*` claims every URL.

use regex::Regex;

/// A compiled URL pattern.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    raw: String,
    regex: Regex,
}

impl UrlPattern {
    /// Compile a pattern.
    pub fn new(raw: &str) -> Result<Self, regex::Error> {
        let body = raw
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        Ok(Self {
            raw: raw.to_string(),
            regex: Regex::new(&body)?,
        })
    }

    /// The pattern as written in the scraper definition.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }
}

impl PartialEq for UrlPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_pattern_is_substring_match() {
        let pattern = UrlPattern::new("example.com").unwrap();
        assert!(pattern.matches("https://www.example.com/scenes/12"));
        assert!(!pattern.matches("https://example.org/scenes/12"));
    }

    #[test]
    fn wildcard_spans_path_segments() {
        let pattern = UrlPattern::new("example.com/performers/*").unwrap();
        assert!(pattern.matches("example.com/performers/1"));
        assert!(pattern.matches("https://example.com/performers/jane-doe/bio"));
        assert!(!pattern.matches("https://example.com/scenes/1"));
    }

    #[test]
    fn bare_wildcard_matches_everything() {
        let pattern = UrlPattern::new("*").unwrap();
        assert!(pattern.matches("https://anything.invalid/"));
        assert!(pattern.matches(""));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let pattern = UrlPattern::new("example.com/watch?v=").unwrap();
        assert!(pattern.matches("https://example.com/watch?v=abc"));
        assert!(!pattern.matches("https://exampleXcom/watchv="));
    }
}
