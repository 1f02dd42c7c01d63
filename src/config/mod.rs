mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    for warning in prepare_config(&mut config)? {
        tracing::warn!("{}", warning);
    }

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./config.toml",
        "./scrapeforged.toml",
        "~/.config/scrapeforged/config.toml",
        "/etc/scrapeforged/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Expand paths, then validate. Returns non-fatal warnings.
fn prepare_config(config: &mut Config) -> Result<Vec<String>> {
    expand_paths(config);
    validate_config(config)
}

fn expand_paths(config: &mut Config) {
    let expand = |p: &Path| -> std::path::PathBuf {
        shellexpand::tilde(&p.to_string_lossy()).into_owned().into()
    };

    config.scrapers.path = expand(&config.scrapers.path);
    if let Some(db) = &config.database.path {
        config.database.path = Some(expand(db));
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<Vec<String>> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.scrapers.script_timeout_secs == 0 {
        anyhow::bail!("Script timeout cannot be 0");
    }

    let mut warnings = Vec::new();
    if !config.scrapers.path.exists() {
        warnings.push(format!(
            "Scrapers path does not exist: {:?}, only the built-in scraper will be available",
            config.scrapers.path
        ));
    }

    Ok(warnings)
}
