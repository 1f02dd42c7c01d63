//! Scraper definition files.
//!
//! A definition is a TOML file in the scrapers directory. The file stem is
//! the scraper ID; the body names the scraper and maps each supported
//! operation to an action:
//!
//! ```toml
//! name = "Example Site"
//!
//! [performer_by_name]
//! action = "script"
//! command = ["python3", "example.py", "search"]
//!
//! [[performer_by_url]]
//! action = "script"
//! url = ["example.com/performers/"]
//! command = ["python3", "example.py", "performer"]
//!
//! [[scene_by_url]]
//! action = "script"
//! url = ["example.com/scenes/"]
//! command = ["python3", "example.py", "scene"]
//! timeout_secs = 120
//! ```
//!
//! Scripts run with the definition's directory as working directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider::{Capabilities, Capability, Scraper};
use super::script::ScriptAction;
use super::types::{ScrapedPerformer, ScrapedPerformerInput, ScrapedScene, SceneInput};
use super::url::UrlPattern;
use crate::error::DefinitionError;

/// File extension of definition files.
pub const DEFINITION_EXTENSION: &str = "toml";

// ---------------------------------------------------------------------------
// File format
// ---------------------------------------------------------------------------

/// Raw contents of a definition file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScraperDefinition {
    pub name: String,
    #[serde(default)]
    pub performer_by_name: Option<ActionConfig>,
    #[serde(default)]
    pub performer_by_fragment: Option<ActionConfig>,
    #[serde(default)]
    pub performer_by_url: Vec<UrlActionConfig>,
    #[serde(default)]
    pub scene_by_fragment: Option<ActionConfig>,
    #[serde(default)]
    pub scene_by_url: Vec<UrlActionConfig>,
}

/// How an operation is carried out.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ActionConfig {
    /// Run an external command, JSON on stdin and stdout.
    Script {
        command: Vec<String>,
        #[serde(default)]
        timeout_secs: Option<u64>,
    },
}

/// An action bound to the URLs it handles.
#[derive(Debug, Clone, Deserialize)]
pub struct UrlActionConfig {
    pub url: Vec<String>,
    #[serde(flatten)]
    pub action: ActionConfig,
}

#[derive(Serialize)]
struct UrlInput<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct NameInput<'a> {
    name: &'a str,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Read and validate the definition at `path`.
///
/// `default_timeout` applies to script actions without their own
/// `timeout_secs`.
pub fn load_definition(
    path: &Path,
    default_timeout: Duration,
) -> Result<DefinitionScraper, DefinitionError> {
    let fail = |reason: String| DefinitionError {
        path: path.to_path_buf(),
        reason,
    };

    let id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| fail("file name is not a valid scraper ID".to_string()))?;

    let content =
        std::fs::read_to_string(path).map_err(|e| fail(format!("failed to read file: {e}")))?;

    let definition: ScraperDefinition =
        toml::from_str(&content).map_err(|e| fail(format!("failed to parse: {e}")))?;

    DefinitionScraper::from_definition(id, definition, path.parent(), default_timeout).map_err(fail)
}

// ---------------------------------------------------------------------------
// Scraper
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct UrlAction {
    patterns: Vec<UrlPattern>,
    action: ScriptAction,
}

fn first_match<'a>(actions: &'a [UrlAction], url: &str) -> Option<&'a ScriptAction> {
    actions
        .iter()
        .find(|a| a.patterns.iter().any(|p| p.matches(url)))
        .map(|a| &a.action)
}

/// A scraper built from a definition file.
#[derive(Debug, Clone)]
pub struct DefinitionScraper {
    id: String,
    name: String,
    capabilities: Capabilities,
    performer_by_name: Option<ScriptAction>,
    performer_by_fragment: Option<ScriptAction>,
    performer_by_url: Vec<UrlAction>,
    scene_by_fragment: Option<ScriptAction>,
    scene_by_url: Vec<UrlAction>,
    performer_patterns: Vec<UrlPattern>,
    scene_patterns: Vec<UrlPattern>,
}

impl DefinitionScraper {
    /// Validate a parsed definition and build the scraper.
    ///
    /// Fails when the name is blank, no operation is configured, a script is
    /// empty, or a URL action has no usable pattern.
    pub fn from_definition(
        id: &str,
        definition: ScraperDefinition,
        base_dir: Option<&Path>,
        default_timeout: Duration,
    ) -> Result<Self, String> {
        if definition.name.trim().is_empty() {
            return Err("scraper name cannot be empty".to_string());
        }

        let working_dir = base_dir
            .filter(|d| !d.as_os_str().is_empty())
            .map(Path::to_path_buf);
        let build = |field: &str, config: ActionConfig| {
            build_action(field, config, working_dir.clone(), default_timeout)
        };
        let build_urls = |field: &str, configs: Vec<UrlActionConfig>| {
            configs
                .into_iter()
                .map(|c| {
                    Ok(UrlAction {
                        patterns: build_patterns(field, &c.url)?,
                        action: build(field, c.action)?,
                    })
                })
                .collect::<Result<Vec<_>, String>>()
        };

        let performer_by_name = definition
            .performer_by_name
            .map(|c| build("performer_by_name", c))
            .transpose()?;
        let performer_by_fragment = definition
            .performer_by_fragment
            .map(|c| build("performer_by_fragment", c))
            .transpose()?;
        let performer_by_url = build_urls("performer_by_url", definition.performer_by_url)?;
        let scene_by_fragment = definition
            .scene_by_fragment
            .map(|c| build("scene_by_fragment", c))
            .transpose()?;
        let scene_by_url = build_urls("scene_by_url", definition.scene_by_url)?;

        let mut capabilities = Capabilities::empty();
        for (present, capability) in [
            (performer_by_name.is_some(), Capability::PerformerSearch),
            (performer_by_fragment.is_some(), Capability::PerformerScrape),
            (!performer_by_url.is_empty(), Capability::PerformerUrl),
            (scene_by_fragment.is_some(), Capability::SceneScrape),
            (!scene_by_url.is_empty(), Capability::SceneUrl),
        ] {
            if present {
                capabilities.insert(capability);
            }
        }

        if capabilities.is_empty() {
            return Err("scraper defines no operations".to_string());
        }

        let flatten = |actions: &[UrlAction]| {
            actions
                .iter()
                .flat_map(|a| a.patterns.iter().cloned())
                .collect::<Vec<_>>()
        };

        Ok(Self {
            id: id.to_string(),
            name: definition.name,
            capabilities,
            performer_patterns: flatten(&performer_by_url),
            scene_patterns: flatten(&scene_by_url),
            performer_by_name,
            performer_by_fragment,
            performer_by_url,
            scene_by_fragment,
            scene_by_url,
        })
    }
}

fn build_action(
    field: &str,
    config: ActionConfig,
    working_dir: Option<PathBuf>,
    default_timeout: Duration,
) -> Result<ScriptAction, String> {
    match config {
        ActionConfig::Script {
            command,
            timeout_secs,
        } => {
            if command.first().map_or(true, |p| p.trim().is_empty()) {
                return Err(format!("{field}: script command cannot be empty"));
            }
            let timeout = match timeout_secs {
                Some(0) => return Err(format!("{field}: timeout_secs must be positive")),
                Some(secs) => Duration::from_secs(secs),
                None => default_timeout,
            };
            Ok(ScriptAction::new(command, working_dir, timeout))
        }
    }
}

fn build_patterns(field: &str, raw: &[String]) -> Result<Vec<UrlPattern>, String> {
    if raw.is_empty() {
        return Err(format!("{field}: at least one url pattern is required"));
    }
    raw.iter()
        .map(|p| {
            if p.trim().is_empty() {
                return Err(format!("{field}: url pattern cannot be empty"));
            }
            UrlPattern::new(p).map_err(|e| format!("{field}: invalid url pattern '{p}': {e}"))
        })
        .collect()
}

#[async_trait]
impl Scraper for DefinitionScraper {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn performer_url_patterns(&self) -> &[UrlPattern] {
        &self.performer_patterns
    }

    fn scene_url_patterns(&self) -> &[UrlPattern] {
        &self.scene_patterns
    }

    async fn scrape_performer_names(&self, query: &str) -> anyhow::Result<Vec<ScrapedPerformer>> {
        let Some(action) = &self.performer_by_name else {
            anyhow::bail!("{} does not support {}", self.id, Capability::PerformerSearch);
        };
        let found: Option<Vec<ScrapedPerformer>> = action.run(&NameInput { name: query }).await?;
        Ok(found.unwrap_or_default())
    }

    async fn scrape_performer(
        &self,
        input: &ScrapedPerformerInput,
    ) -> anyhow::Result<Option<ScrapedPerformer>> {
        let Some(action) = &self.performer_by_fragment else {
            anyhow::bail!("{} does not support {}", self.id, Capability::PerformerScrape);
        };
        action.run(input).await
    }

    async fn scrape_performer_url(&self, url: &str) -> anyhow::Result<Option<ScrapedPerformer>> {
        match first_match(&self.performer_by_url, url) {
            Some(action) => action.run(&UrlInput { url }).await,
            None => Ok(None),
        }
    }

    async fn scrape_scene(&self, input: &SceneInput) -> anyhow::Result<Option<ScrapedScene>> {
        let Some(action) = &self.scene_by_fragment else {
            anyhow::bail!("{} does not support {}", self.id, Capability::SceneScrape);
        };
        action.run(input).await
    }

    async fn scrape_scene_url(&self, url: &str) -> anyhow::Result<Option<ScrapedScene>> {
        match first_match(&self.scene_by_url, url) {
            Some(action) => action.run(&UrlInput { url }).await,
            None => Ok(None),
        }
    }
}
