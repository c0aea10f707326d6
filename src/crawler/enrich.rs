//! Post-crawl enrichment
//!
//! An [`Enricher`] runs once after the crawl has completed and may add extra
//! text blocks (for example content only visible after client-side
//! rendering). Enrichment is best effort: its failures never fail the crawl.

use crate::crawler::Crawler;
use crate::output::{CrawlOutcome, CrawledPage};
use crate::CrawlError;
use futures::future::BoxFuture;

/// A post-processing stage that produces extra text blocks for a crawled site
pub trait Enricher: Send + Sync {
    /// Produces extra blocks for the site of `seed_url`
    ///
    /// `outcome` holds the pages accepted by the crawl. Blocks with blank
    /// text are dropped.
    fn enrich<'a>(
        &'a self,
        seed_url: &'a str,
        outcome: &'a CrawlOutcome,
    ) -> BoxFuture<'a, Result<Vec<CrawledPage>, CrawlError>>;
}

impl Crawler {
    /// Crawls the site, then runs `enricher` with the configured time limit
    ///
    /// Enrichment blocks follow the crawled pages in
    /// [`CrawlOutcome::combined_text`] and never count toward
    /// [`CrawlOutcome::pages_crawled`].
    pub async fn crawl_with_enrichment(
        &self,
        seed_url: &str,
        max_pages: usize,
        enricher: &dyn Enricher,
    ) -> Result<CrawlOutcome, CrawlError> {
        let mut outcome = self.crawl(seed_url, max_pages).await?;

        let limit = self.config().enrichment_timeout();
        let result = tokio::time::timeout(limit, enricher.enrich(seed_url, &outcome)).await;

        match result {
            Ok(Ok(blocks)) => {
                tracing::info!("Enrichment added {} block(s) for {}", blocks.len(), seed_url);
                outcome.append_enrichments(blocks);
            }
            Ok(Err(e)) => {
                tracing::warn!("Enrichment failed for {}, keeping crawled pages: {}", seed_url, e);
            }
            Err(_) => {
                tracing::warn!(
                    "Enrichment for {} timed out after {:?}, keeping crawled pages",
                    seed_url,
                    limit
                );
            }
        }

        Ok(outcome)
    }
}
