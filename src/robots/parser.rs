//! Robots.txt parser implementation
//!
//! Extracts the two directives the crawler acts on (`Sitemap` and
//! `Crawl-delay`) and keeps the raw body for Allow/Disallow matching through
//! the robotstxt crate.

use robotstxt::DefaultMatcher;
use std::time::Duration;

/// What one robots.txt fetch told us about a site
///
/// An empty value (no sitemaps, no delay, no rules) is the result for a
/// missing or unreachable robots.txt and allows everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RobotsInfo {
    /// `Sitemap:` values in file order
    pub sitemap_urls: Vec<String>,

    /// First valid `Crawl-delay:` value, in seconds
    pub crawl_delay: Option<f64>,

    /// Raw robots.txt content (empty string means allow all)
    content: String,
}

impl RobotsInfo {
    /// Returns the value used when robots.txt could not be fetched
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses raw robots.txt content
    ///
    /// Directive names are matched case-insensitively. Empty `Sitemap:`
    /// values are skipped. A `Crawl-delay:` that is not a finite,
    /// non-negative number is ignored; the first valid one wins.
    pub fn parse(content: &str) -> Self {
        let mut sitemap_urls = Vec::new();
        let mut crawl_delay = None;

        for line in content.lines() {
            // Strip trailing comments
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();

            match key.trim().to_lowercase().as_str() {
                "sitemap" => {
                    if !value.is_empty() {
                        sitemap_urls.push(value.to_string());
                    }
                }
                "crawl-delay" => {
                    if crawl_delay.is_none() {
                        crawl_delay = parse_delay(value);
                    }
                }
                _ => {}
            }
        }

        Self {
            sitemap_urls,
            crawl_delay,
            content: content.to_string(),
        }
    }

    /// Returns true if nothing was learned from robots.txt
    pub fn is_empty(&self) -> bool {
        self.sitemap_urls.is_empty() && self.crawl_delay.is_none() && self.content.is_empty()
    }

    /// The crawl delay as a sleepable duration
    pub fn crawl_delay_duration(&self) -> Option<Duration> {
        self.crawl_delay
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to check
    /// * `user_agent` - The robots.txt agent token (the crawler name)
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.content.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }
}

fn parse_delay(value: &str) -> Option<f64> {
    let delay = value.parse::<f64>().ok()?;
    if !delay.is_finite() || delay < 0.0 {
        return None;
    }
    // Rejects values too large to sleep on
    Duration::try_from_secs_f64(delay).ok()?;
    Some(delay)
}
