//! Output module for crawl results
//!
//! This module handles:
//! - The `CrawlOutcome` returned by a crawl
//! - Rendering accepted pages as the combined text handed to downstream stages
//! - Recording and printing crawl statistics

pub mod stats;

pub use stats::{print_statistics, CrawlStats};

/// Delimiter line that opens each page block in the combined text
pub fn page_delimiter(url: &str) -> String {
    format!("--- PAGE: {} ---", url)
}

/// One block of extracted text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawledPage {
    /// The page URL (normalized for crawled pages)
    pub url: String,

    /// Extracted text, one item per line
    pub text: String,
}

impl CrawledPage {
    /// Renders the page as a delimited block
    pub fn to_block(&self) -> String {
        format!("{}\n{}", page_delimiter(&self.url), self.text)
    }
}

/// Result of one crawl invocation
///
/// Pages are kept in acceptance order and never share a content
/// fingerprint. Enrichment blocks are carried separately so they never count
/// against the page budget.
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    pages: Vec<CrawledPage>,
    enrichments: Vec<CrawledPage>,
    stats: CrawlStats,
}

impl CrawlOutcome {
    pub fn new(pages: Vec<CrawledPage>, stats: CrawlStats) -> Self {
        Self {
            pages,
            enrichments: Vec::new(),
            stats,
        }
    }

    /// Accepted pages in acceptance order
    pub fn pages(&self) -> &[CrawledPage] {
        &self.pages
    }

    /// Number of unique pages accepted
    pub fn pages_crawled(&self) -> usize {
        self.pages.len()
    }

    /// Extra blocks appended by a post-processing stage
    pub fn enrichments(&self) -> &[CrawledPage] {
        &self.enrichments
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// Appends blocks produced after the crawl completed
    pub fn append_enrichments(&mut self, blocks: impl IntoIterator<Item = CrawledPage>) {
        self.enrichments
            .extend(blocks.into_iter().filter(|b| !b.text.trim().is_empty()));
    }

    /// Renders all blocks, pages first, separated by a blank line
    ///
    /// # Example
    ///
    /// ```
    /// use site_harvest::output::{CrawlOutcome, CrawlStats, CrawledPage};
    ///
    /// let outcome = CrawlOutcome::new(
    ///     vec![
    ///         CrawledPage { url: "https://x.com".into(), text: "Home".into() },
    ///         CrawledPage { url: "https://x.com/about".into(), text: "About us".into() },
    ///     ],
    ///     CrawlStats::default(),
    /// );
    /// assert_eq!(
    ///     outcome.combined_text(),
    ///     "--- PAGE: https://x.com ---\nHome\n\n--- PAGE: https://x.com/about ---\nAbout us"
    /// );
    /// ```
    pub fn combined_text(&self) -> String {
        self.pages
            .iter()
            .chain(self.enrichments.iter())
            .map(CrawledPage::to_block)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Consumes the outcome into `(combined_text, pages_crawled)`
    pub fn into_parts(self) -> (String, usize) {
        (self.combined_text(), self.pages_crawled())
    }
}
