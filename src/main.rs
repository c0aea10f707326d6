//! Site-Harvest main entry point
//!
//! This is the command-line interface for the Site-Harvest crawler.

use anyhow::Context;
use clap::Parser;
use site_harvest::config::{load_config_with_hash, Config};
use site_harvest::output::print_statistics;
use site_harvest::Crawler;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Harvest: a single-origin site crawler
///
/// Site-Harvest discovers the pages of one website through robots.txt,
/// sitemaps and in-page links, and prints their deduplicated text as
/// `--- PAGE: <url> ---` blocks.
#[derive(Parser, Debug)]
#[command(name = "site-harvest")]
#[command(version)]
#[command(about = "A single-origin site crawler", long_about = None)]
struct Cli {
    /// Seed URL of the site to crawl
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum number of unique pages to accept (defaults to the config value)
    #[arg(short = 'n', long, value_name = "N")]
    max_pages: Option<usize>,

    /// Scrape only the given page instead of crawling the site
    #[arg(long, conflicts_with = "max_pages")]
    single: bool,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the combined text to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print crawl statistics to stderr when done
    #[arg(long, conflicts_with = "single")]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let max_pages = cli.max_pages.unwrap_or(config.crawler.max_pages);
    let request_timeout = config.crawler.request_timeout();
    let crawler = Crawler::new(config).context("Failed to initialize crawler")?;

    let text = if cli.single {
        crawler
            .scrape(&cli.url, request_timeout)
            .await
            .with_context(|| format!("Failed to scrape {}", cli.url))?
    } else {
        let outcome = crawler
            .crawl(&cli.url, max_pages)
            .await
            .with_context(|| format!("Failed to crawl {}", cli.url))?;
        if cli.stats {
            print_statistics(outcome.stats());
        }
        outcome.combined_text()
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            tracing::info!("Wrote {} bytes to {}", text.len(), path.display());
        }
        None => println!("{}", text),
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the combined text.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_harvest=info,warn"),
            1 => EnvFilter::new("site_harvest=debug,info"),
            2 => EnvFilter::new("site_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
