//! Crawl statistics
//!
//! Counters collected by the orchestrator while it merges batch results.

use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStats {
    /// URLs dispatched to a fetch
    pub urls_visited: usize,

    /// Page URLs contributed by sitemaps
    pub sitemap_urls: usize,

    /// Pages accepted into the outcome
    pub pages_accepted: usize,

    /// Fetches that failed after retries, or failed terminally
    pub failures: usize,

    /// Pages dropped because their text was already seen
    pub duplicates: usize,

    /// Pages that produced no text (including non-HTML responses)
    pub empty_pages: usize,

    /// Crawl-delay honored for this site, if robots.txt declared one
    pub crawl_delay: Option<f64>,

    /// Wall time of the crawl
    pub elapsed: Duration,
}

impl CrawlStats {
    /// Share of visited URLs that became accepted pages, in percent
    pub fn acceptance_rate(&self) -> f64 {
        if self.urls_visited == 0 {
            return 0.0;
        }
        (self.pages_accepted as f64 / self.urls_visited as f64) * 100.0
    }
}

/// Prints statistics to stderr in a formatted manner
///
/// stderr keeps stdout free for the combined text.
pub fn print_statistics(stats: &CrawlStats) {
    eprintln!("=== Crawl Statistics ===\n");

    eprintln!("Overview:");
    eprintln!("  URLs visited: {}", stats.urls_visited);
    eprintln!("  URLs from sitemaps: {}", stats.sitemap_urls);
    eprintln!("  Pages accepted: {}", stats.pages_accepted);
    eprintln!("  Elapsed: {:.1}s", stats.elapsed.as_secs_f64());
    if let Some(delay) = stats.crawl_delay {
        eprintln!("  Crawl-delay: {}s", delay);
    }
    eprintln!();

    eprintln!("Skipped:");
    eprintln!("  Failed fetches: {}", stats.failures);
    eprintln!("  Duplicate content: {}", stats.duplicates);
    eprintln!("  Empty or non-HTML: {}", stats.empty_pages);
    eprintln!();

    eprintln!(
        "Acceptance Rate: {:.1}% ({} / {} URLs accepted)",
        stats.acceptance_rate(),
        stats.pages_accepted,
        stats.urls_visited
    );
}
