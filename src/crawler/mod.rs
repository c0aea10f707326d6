//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - HTML text and link extraction
//! - Frontier management and content deduplication
//! - Overall crawl coordination and optional enrichment

mod coordinator;
mod dedup;
mod enrich;
mod extractor;
mod fetcher;
mod frontier;

pub use coordinator::Crawler;
pub use dedup::{ContentDeduplicator, Fingerprint};
pub use enrich::Enricher;
pub use extractor::{extract_page, extract_text, ExtractedPage, SKIPPED_ELEMENTS};
pub use fetcher::{build_http_client, fetch_page, fetch_with_retry, is_html, FetchedPage, RetryPolicy};
pub use frontier::Frontier;
