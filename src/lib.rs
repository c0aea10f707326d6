//! Site-Harvest: a single-origin site crawler for knowledge-base ingestion
//!
//! This crate discovers the content-bearing pages of one website through
//! robots.txt, sitemaps and in-page links, fetches them under a concurrency
//! bound with retries, and returns deduplicated page text.

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod sitemap;
pub mod state;
pub mod url;

use std::time::Duration;
use thiserror::Error;

/// Main error type for Site-Harvest operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Crawl task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Fetch slot unavailable: {0}")]
    Semaphore(#[from] tokio::sync::AcquireError),

    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },

    #[error("Enrichment failed: {0}")]
    Enrichment(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Errors surfaced by a single page fetch once retries are exhausted
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Returns the HTTP status code, if the failure was an HTTP response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for Site-Harvest operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Crawler, Enricher};
pub use output::{CrawlOutcome, CrawledPage};
pub use state::CrawlPhase;
pub use url::{is_crawlable, normalize_url, same_origin, NormalizedUrl, Origin};

/// Crawls a site with the default configuration
///
/// Returns the combined page text and the number of unique pages accepted.
pub async fn crawl(seed_url: &str, max_pages: usize) -> Result<(String, usize)> {
    let crawler = Crawler::new(Config::default())?;
    let outcome = crawler.crawl(seed_url, max_pages).await?;
    Ok((outcome.combined_text(), outcome.pages_crawled()))
}

/// Scrapes a single page with the default configuration
pub async fn scrape(url: &str, timeout: Duration) -> Result<String> {
    let crawler = Crawler::new(Config::default())?;
    crawler.scrape(url, timeout).await
}
