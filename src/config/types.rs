use serde::Deserialize;
use std::time::Duration;

/// Well-known sitemap locations probed after the robots.txt declarations
pub const DEFAULT_SITEMAP_PATHS: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap-index.xml",
    "/sitemap/sitemap.xml",
    "/wp-sitemap.xml",
    "/page-sitemap.xml",
    "/post-sitemap.xml",
];

/// Main configuration structure for Site-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Crawler transport and budget configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Default page budget used when the caller does not pass one
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Maximum number of concurrent page fetches
    pub concurrency: usize,

    /// Per-request timeout for page fetches (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Timeout for the robots.txt fetch (seconds)
    #[serde(rename = "robots-timeout-secs")]
    pub robots_timeout_secs: u64,

    /// Timeout for each sitemap fetch (seconds)
    #[serde(rename = "sitemap-timeout-secs")]
    pub sitemap_timeout_secs: u64,

    /// Total attempts per page, including the first
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Base of the exponential backoff between attempts (seconds)
    #[serde(rename = "backoff-base-secs")]
    pub backoff_base_secs: f64,

    /// Upper bound on a post-crawl enrichment stage (seconds)
    #[serde(rename = "enrichment-timeout-secs")]
    pub enrichment_timeout_secs: u64,

    /// Skip URLs disallowed by robots.txt
    #[serde(rename = "respect-robots-disallow")]
    pub respect_robots_disallow: bool,

    /// Sitemap paths probed relative to the site root
    #[serde(rename = "sitemap-paths")]
    pub sitemap_paths: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 50,
            concurrency: 8,
            request_timeout_secs: 15,
            robots_timeout_secs: 10,
            sitemap_timeout_secs: 10,
            max_retries: 3,
            backoff_base_secs: 2.0,
            enrichment_timeout_secs: 120,
            respect_robots_disallow: true,
            sitemap_paths: DEFAULT_SITEMAP_PATHS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl CrawlerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn robots_timeout(&self) -> Duration {
        Duration::from_secs(self.robots_timeout_secs)
    }

    pub fn sitemap_timeout(&self) -> Duration {
        Duration::from_secs(self.sitemap_timeout_secs)
    }

    pub fn enrichment_timeout(&self) -> Duration {
        Duration::from_secs(self.enrichment_timeout_secs)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler, also the robots.txt agent token
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "site-harvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/site-harvest/site-harvest".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}
