//! Sitemap discovery module
//!
//! Expands robots.txt-declared and well-known sitemaps into a flat list of
//! same-origin, crawlable page URLs. Sitemap indexes are followed
//! recursively; every sitemap URL is expanded at most once, so indexes that
//! reference each other (or themselves) still terminate.

mod parser;

pub use parser::{parse_sitemap, SitemapDocument};

use crate::url::{admit, normalize_url, NormalizedUrl, Origin};
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Sitemap-specific errors
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Malformed sitemap XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Sitemap XML ended with {0} unclosed element(s)")]
    Truncated(usize),
}

/// Builds the ordered, deduplicated list of sitemaps to probe
///
/// robots.txt declarations come first, then each fallback path joined to the
/// site root. Candidates are deduplicated by normalized URL; declarations
/// that do not parse as http(s) URLs are dropped.
///
/// # Arguments
///
/// * `declared` - `Sitemap:` values from robots.txt
/// * `base` - Any URL on the site
/// * `fallback_paths` - Well-known sitemap paths, e.g. `/sitemap.xml`
pub fn sitemap_candidates(declared: &[String], base: &Url, fallback_paths: &[String]) -> Vec<String> {
    let fallbacks = fallback_paths
        .iter()
        .filter_map(|path| base.join(path).ok())
        .map(String::from);

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for candidate in declared.iter().cloned().chain(fallbacks) {
        match normalize_url(&candidate) {
            Ok(normalized) => {
                if seen.insert(normalized) {
                    candidates.push(candidate);
                }
            }
            Err(e) => tracing::debug!("Ignoring sitemap candidate {}: {}", candidate, e),
        }
    }

    candidates
}

/// Resolves sitemap candidates into crawlable page URLs
///
/// Each candidate is fetched once. Failures of any kind (non-200, HTML
/// content type, malformed XML, transport errors) contribute nothing and
/// never abort discovery.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `candidates` - Sitemap URLs in probe order
/// * `origin` - Only page URLs of this origin are kept
/// * `timeout` - Timeout for each sitemap request
///
/// # Returns
///
/// Normalized page URLs in order of first appearance, without duplicates
pub async fn resolve_sitemaps(
    client: &Client,
    candidates: &[String],
    origin: &Origin,
    timeout: Duration,
) -> Vec<NormalizedUrl> {
    // Keyed by the raw sitemap URL so a cycle can never be re-entered
    let mut expanded: HashSet<String> = HashSet::new();
    let mut pending: VecDeque<String> = candidates.iter().cloned().collect();

    let mut seen: HashSet<NormalizedUrl> = HashSet::new();
    let mut urls = Vec::new();

    while let Some(sitemap_url) = pending.pop_front() {
        if !expanded.insert(sitemap_url.clone()) {
            tracing::debug!("Sitemap {} already expanded, skipping", sitemap_url);
            continue;
        }

        match fetch_sitemap(client, &sitemap_url, timeout).await {
            Some(SitemapDocument::Index(children)) => {
                tracing::info!(
                    "Sitemap index {} -> {} child sitemaps",
                    sitemap_url,
                    children.len()
                );
                // Children are expanded before the remaining candidates
                for child in children.into_iter().rev() {
                    pending.push_front(child);
                }
            }
            Some(SitemapDocument::UrlSet(locs)) => {
                let mut kept = 0;
                for loc in locs {
                    let Ok(url) = Url::parse(&loc) else {
                        continue;
                    };
                    if let Some(normalized) = admit(url, origin) {
                        if seen.insert(normalized.clone()) {
                            urls.push(normalized);
                            kept += 1;
                        }
                    }
                }
                tracing::info!("Sitemap {} -> {} URLs", sitemap_url, kept);
            }
            Some(SitemapDocument::Other) => {
                tracing::debug!("{} is not a sitemap document", sitemap_url);
            }
            None => {}
        }
    }

    urls
}

/// Fetches and parses one sitemap, returning None on any failure
async fn fetch_sitemap(client: &Client, sitemap_url: &str, timeout: Duration) -> Option<SitemapDocument> {
    let response = match client.get(sitemap_url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("Sitemap fetch failed {}: {}", sitemap_url, e);
            return None;
        }
    };

    if response.status() != StatusCode::OK {
        tracing::debug!(
            "Sitemap {} returned HTTP {}",
            sitemap_url,
            response.status().as_u16()
        );
        return None;
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();
    if content_type.contains("html") && !content_type.contains("xml") {
        tracing::debug!("Sitemap {} served HTML, not a sitemap", sitemap_url);
        return None;
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!("Failed to read sitemap body {}: {}", sitemap_url, e);
            return None;
        }
    };

    match parse_sitemap(&body) {
        Ok(document) => Some(document),
        Err(e) => {
            tracing::debug!("XML parse error for sitemap {}: {}", sitemap_url, e);
            None
        }
    }
}
