mod cli;

use scrapeforged::{
    catalog::SqliteCatalog,
    config::{self, Config},
    dispatch::Dispatcher,
    scraper::{SceneInput, ScraperRegistry},
    server,
};
use scrapeforged_common::ScrapeContentType;
use scrapeforged_db::pool::{init_memory_pool, init_pool};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;

fn build_registry(config: &Config) -> ScraperRegistry {
    ScraperRegistry::new(&config.scrapers.path)
        .with_script_timeout(config.scrapers.script_timeout())
}

fn build_dispatcher(config: &Config) -> Result<Dispatcher> {
    let pool = match &config.database.path {
        Some(path) => {
            let path = path.to_string_lossy();
            tracing::info!("Opening catalog database at {}", path);
            init_pool(&path)?
        }
        None => {
            tracing::info!("No catalog database configured, using an empty in-memory catalog");
            init_memory_pool()?
        }
    };

    Ok(Dispatcher::new(
        Arc::new(build_registry(config)),
        Arc::new(SqliteCatalog::new(pool)),
    ))
}

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting Scrapeforged server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    let dispatcher = build_dispatcher(&config)?;
    server::start_server(config, dispatcher).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "scrapeforged=trace,scrapeforged_db=debug,scrapeforged_common=debug,tower_http=debug"
                .to_string()
        } else {
            "scrapeforged=info,scrapeforged_db=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::List { kind } => list_scrapers(cli.config.as_deref(), kind),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate(path.as_deref())
        }
        Commands::ScrapeUrl { url, kind } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(scrape_url(cli.config.as_deref(), &url, kind))
        }
        Commands::ScrapeScene {
            scraper_id,
            title,
            path,
        } => {
            let input = SceneInput {
                title,
                path,
                ..Default::default()
            };
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(scrape_scene(cli.config.as_deref(), &scraper_id, &input))
        }
        Commands::Version => {
            println!("scrapeforged {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn list_scrapers(config_path: Option<&Path>, kind: Option<ScrapeContentType>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let registry = build_registry(&config);

    let summaries = match kind {
        Some(ScrapeContentType::Performer) => registry.list_performer_scrapers()?,
        Some(ScrapeContentType::Scene) => registry.list_scene_scrapers()?,
        None => registry.scrapers()?.iter().map(|s| s.summary()).collect(),
    };

    for summary in &summaries {
        let mut kinds = Vec::new();
        if summary.performer.is_some() {
            kinds.push("performer");
        }
        if summary.scene.is_some() {
            kinds.push("scene");
        }
        println!("{}\t{}\t{}", summary.id, summary.name, kinds.join(","));
    }

    let failures = registry.failures()?;
    if !failures.is_empty() {
        eprintln!(
            "{} definition(s) failed to load, run `validate` for details",
            failures.len()
        );
    }

    Ok(())
}

fn validate(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            config::load_config_or_default(None)?
        }
    };

    println!("✓ Configuration is valid");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Scrapers path: {:?}", config.scrapers.path);
    println!("  Script timeout: {}s", config.scrapers.script_timeout_secs);

    let registry = build_registry(&config);
    let report = registry.load()?;
    println!("  Scrapers loaded: {}", report.scrapers.len());

    if report.failures.is_empty() {
        return Ok(());
    }

    println!("\nInvalid scraper definitions:");
    for failure in &report.failures {
        println!("  ✗ {}", failure);
    }
    anyhow::bail!("{} scraper definition(s) are invalid", report.failures.len())
}

async fn scrape_url(config_path: Option<&Path>, url: &str, kind: ScrapeContentType) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let dispatcher = build_dispatcher(&config)?;

    let content = dispatcher.scrape_url(url, kind).await?;
    if content.is_none() {
        tracing::warn!("No {} scraper claims {}", kind, url);
    }

    println!("{}", serde_json::to_string_pretty(&content)?);
    Ok(())
}

async fn scrape_scene(
    config_path: Option<&Path>,
    scraper_id: &str,
    input: &SceneInput,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let dispatcher = build_dispatcher(&config)?;

    let scene = dispatcher.scrape_scene(scraper_id, input).await?;
    println!("{}", serde_json::to_string_pretty(&scene)?);
    Ok(())
}
