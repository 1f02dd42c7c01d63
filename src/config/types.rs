use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub scrapers: ScrapersConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    9998
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrapersConfig {
    /// Directory holding scraper definition files
    #[serde(default = "default_scrapers_path")]
    pub path: PathBuf,

    /// Time limit for a single script run, unless a definition sets its own
    #[serde(default = "default_script_timeout")]
    pub script_timeout_secs: u64,
}

fn default_scrapers_path() -> PathBuf {
    PathBuf::from("./scrapers")
}
fn default_script_timeout() -> u64 {
    60
}

impl ScrapersConfig {
    pub fn script_timeout(&self) -> Duration {
        Duration::from_secs(self.script_timeout_secs)
    }
}

impl Default for ScrapersConfig {
    fn default() -> Self {
        Self {
            path: default_scrapers_path(),
            script_timeout_secs: default_script_timeout(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Catalog database file. An empty in-memory catalog is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}
