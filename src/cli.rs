use clap::{Parser, Subcommand};
use scrapeforged_common::ScrapeContentType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scrapeforged")]
#[command(author, version, about = "Metadata scraper registry and dispatch service")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List available scrapers
    List {
        /// Only list scrapers for this content type
        #[arg(long)]
        kind: Option<ScrapeContentType>,
    },

    /// Validate configuration and scraper definitions
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Scrape a URL with the first scraper that claims it
    ScrapeUrl {
        /// URL to scrape
        url: String,

        /// Content type to scrape
        #[arg(long, default_value = "scene")]
        kind: ScrapeContentType,
    },

    /// Scrape a scene fragment with a specific scraper
    ScrapeScene {
        /// Scraper ID
        scraper_id: String,

        /// Scene title
        #[arg(long)]
        title: Option<String>,

        /// Scene file path
        #[arg(long)]
        path: Option<String>,
    },

    /// Display version information
    Version,
}
