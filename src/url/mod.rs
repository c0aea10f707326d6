//! URL handling module for Site-Harvest
//!
//! This module provides URL normalization, origin comparison, and the
//! crawlability filter that decides which URLs are worth fetching.

mod filter;
mod normalize;
mod origin;

// Re-export main functions
pub use filter::{is_crawlable, is_crawlable_url};
pub use normalize::{normalize_parsed, normalize_url, NormalizedUrl};
pub use origin::{same_origin, Origin};

/// Normalizes a URL and keeps it only if it is a crawlable page of `origin`
///
/// This is the gate every discovered URL (sitemap entry or in-page link)
/// passes before it can reach the frontier.
pub fn admit(url: ::url::Url, origin: &Origin) -> Option<NormalizedUrl> {
    if !origin.contains(&url) || !is_crawlable_url(&url) {
        return None;
    }
    normalize_parsed(url).ok()
}
