//! Robots.txt handling module
//!
//! robots.txt is fetched once per crawl. A missing or unreachable file is not
//! an error: the crawl simply proceeds without sitemaps, delay or rules from it.

mod parser;

pub use parser::RobotsInfo;

use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Fetches robots.txt for the site rooted at `base`
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `base` - Any URL on the site; only scheme, host and port are used
/// * `timeout` - Timeout for this single request
///
/// # Returns
///
/// The parsed robots.txt, or [`RobotsInfo::empty`] on a non-200 response or
/// a transport failure
pub async fn fetch_robots(client: &Client, base: &Url, timeout: Duration) -> RobotsInfo {
    let robots_url = match base.join("/robots.txt") {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Cannot build robots.txt URL from {}: {}", base, e);
            return RobotsInfo::empty();
        }
    };

    let response = match client.get(robots_url.clone()).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("robots.txt fetch failed for {}: {}", robots_url, e);
            return RobotsInfo::empty();
        }
    };

    if response.status() != StatusCode::OK {
        tracing::debug!(
            "robots.txt at {} returned HTTP {}",
            robots_url,
            response.status().as_u16()
        );
        return RobotsInfo::empty();
    }

    match response.text().await {
        Ok(body) => {
            let robots = RobotsInfo::parse(&body);
            tracing::info!(
                "robots.txt at {} listed {} sitemap(s), crawl-delay: {:?}",
                robots_url,
                robots.sitemap_urls.len(),
                robots.crawl_delay
            );
            robots
        }
        Err(e) => {
            tracing::debug!("Failed to read robots.txt body from {}: {}", robots_url, e);
            RobotsInfo::empty()
        }
    }
}
