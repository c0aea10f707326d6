//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that coordinates all aspects of
//! one crawl, including:
//! - Discovering pages through robots.txt and sitemaps
//! - Managing the frontier queue
//! - Dispatching bounded batches of fetches
//! - Merging results, deduplicating content and following links
//! - Producing the final outcome and statistics

use crate::config::{validate, Config, CrawlerConfig, UserAgentConfig};
use crate::crawler::dedup::{ContentDeduplicator, Fingerprint};
use crate::crawler::extractor::{extract_page, extract_text, ExtractedPage};
use crate::crawler::fetcher::{build_http_client, fetch_page, RetryPolicy};
use crate::crawler::frontier::Frontier;
use crate::output::{CrawlOutcome, CrawlStats, CrawledPage};
use crate::robots::{fetch_robots, RobotsInfo};
use crate::sitemap::{resolve_sitemaps, sitemap_candidates};
use crate::state::CrawlPhase;
use crate::url::{is_crawlable, normalize_url, NormalizedUrl, Origin};
use crate::CrawlError;
use futures::future::join_all;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinError;

/// Site crawler
///
/// Transport settings (timeouts, retries, concurrency, user agent) are fixed
/// when the crawler is built. Each call to [`Crawler::crawl`] owns its own
/// frontier and sets, so concurrent crawls never share state.
pub struct Crawler {
    client: Client,
    config: Arc<CrawlerConfig>,
    user_agent: UserAgentConfig,
    retry: RetryPolicy,
}

/// Everything a page task needs, shared across one crawl's tasks
struct PageContext {
    client: Client,
    semaphore: Arc<Semaphore>,
    retry: RetryPolicy,
    request_timeout: Duration,
    crawl_delay: Option<Duration>,
    origin: Origin,
}

/// What one page task hands back to the orchestrator
struct PageResult {
    url: NormalizedUrl,
    outcome: Result<ExtractedPage, CrawlError>,
}

impl PageResult {
    /// Folds a task that died (panicked or was cancelled) into a page failure
    fn from_join(url: NormalizedUrl, joined: Result<PageResult, JoinError>) -> Self {
        match joined {
            Ok(result) => result,
            Err(e) => Self {
                url,
                outcome: Err(CrawlError::Task(e)),
            },
        }
    }
}

impl Crawler {
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(CrawlError)` - Invalid configuration or HTTP client failure
    pub fn new(config: Config) -> Result<Self, CrawlError> {
        validate(&config)?;

        let client = build_http_client(&config.user_agent, config.crawler.request_timeout())?;
        let retry = RetryPolicy::from_config(&config.crawler);

        Ok(Self {
            client,
            config: Arc::new(config.crawler),
            user_agent: config.user_agent,
            retry,
        })
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Fetches one page and returns its extracted text
    ///
    /// Non-HTML responses yield empty text.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The page text
    /// * `Err(CrawlError::Url)` - The URL is not an absolute http(s) URL
    /// * `Err(CrawlError::Fetch)` - The page could not be retrieved
    pub async fn scrape(&self, url: &str, timeout: Duration) -> Result<String, CrawlError> {
        // Checked for scheme and host only; the URL is fetched as given
        normalize_url(url)?;
        let target = url.trim();
        let page = fetch_page(&self.client, target, &self.retry, timeout).await?;

        if !page.is_html() {
            tracing::debug!("{} is not HTML ({}), no text", target, page.content_type);
            return Ok(String::new());
        }

        Ok(extract_text(&page.body))
    }

    /// Crawls the site of `seed_url`, accepting at most `max_pages` unique pages
    ///
    /// Only an unparsable seed URL fails the crawl; every per-page and
    /// per-sitemap failure is logged and skipped.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use site_harvest::{Config, Crawler};
    ///
    /// # async fn run() -> site_harvest::Result<()> {
    /// let crawler = Crawler::new(Config::default())?;
    /// let outcome = crawler.crawl("https://example.com", 20).await?;
    /// println!("{}", outcome.combined_text());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn crawl(&self, seed_url: &str, max_pages: usize) -> Result<CrawlOutcome, CrawlError> {
        let started = Instant::now();

        let seed = normalize_url(seed_url)?;
        let base = seed.to_url()?;
        let origin = Origin::from_url(&base)?;

        let mut phase = CrawlPhase::Discovering;
        let mut stats = CrawlStats::default();
        tracing::info!("Crawling {} (up to {} pages)", seed, max_pages);

        let robots = fetch_robots(&self.client, &base, self.config.robots_timeout()).await;
        stats.crawl_delay = robots.crawl_delay;

        let candidates = sitemap_candidates(&robots.sitemap_urls, &base, &self.config.sitemap_paths);
        let sitemap_urls =
            resolve_sitemaps(&self.client, &candidates, &origin, self.config.sitemap_timeout()).await;
        stats.sitemap_urls = sitemap_urls.len();
        tracing::info!(
            "Discovered {} page URLs from {} sitemap candidates",
            sitemap_urls.len(),
            candidates.len()
        );

        let mut frontier = Frontier::new();
        self.try_enqueue(&mut frontier, &robots, seed.clone());
        for url in sitemap_urls {
            self.try_enqueue(&mut frontier, &robots, url);
        }

        phase = phase.transition(CrawlPhase::Crawling)?;

        let context = Arc::new(PageContext {
            client: self.client.clone(),
            semaphore: Arc::new(Semaphore::new(self.config.concurrency)),
            retry: self.retry,
            request_timeout: self.config.request_timeout(),
            crawl_delay: robots.crawl_delay_duration(),
            origin,
        });

        let mut pages: Vec<CrawledPage> = Vec::new();
        let mut dedup = ContentDeduplicator::new();

        while !frontier.is_empty() && pages.len() < max_pages {
            let batch_size = self.config.concurrency.min(max_pages - pages.len());
            let batch = frontier.next_batch(batch_size);
            if batch.is_empty() {
                break;
            }
            stats.urls_visited += batch.len();
            tracing::debug!(
                "Dispatching batch of {} ({} queued, {} accepted)",
                batch.len(),
                frontier.len(),
                pages.len()
            );

            let handles: Vec<_> = batch
                .iter()
                .cloned()
                .map(|url| {
                    let context = Arc::clone(&context);
                    tokio::spawn(crawl_page(context, url))
                })
                .collect();

            // Results arrive in batch order regardless of completion order
            for (url, joined) in batch.into_iter().zip(join_all(handles).await) {
                let result = PageResult::from_join(url, joined);

                let page = match result.outcome {
                    Ok(page) => page,
                    Err(e) => {
                        tracing::warn!("Skipping {}: {}", result.url, e);
                        stats.failures += 1;
                        continue;
                    }
                };

                if page.text.is_empty() {
                    tracing::debug!("No text extracted from {}, skipping", result.url);
                    stats.empty_pages += 1;
                    continue;
                }

                let fingerprint = Fingerprint::of(&page.text);
                if !dedup.insert(fingerprint) {
                    tracing::info!(
                        "Duplicate content at {} ({}), skipping",
                        result.url,
                        fingerprint
                    );
                    stats.duplicates += 1;
                    continue;
                }

                let mut enqueued = 0;
                for link in page.links {
                    if self.try_enqueue(&mut frontier, &robots, link) {
                        enqueued += 1;
                    }
                }
                tracing::debug!("Accepted {} ({} new links)", result.url, enqueued);

                pages.push(CrawledPage {
                    url: result.url.into(),
                    text: page.text,
                });
            }
        }

        phase.transition(CrawlPhase::Completed)?;

        stats.pages_accepted = pages.len();
        stats.elapsed = started.elapsed();
        tracing::info!(
            "Crawl of {} complete: {} pages accepted, {} URLs visited, {} failed, {} duplicates in {:.1}s",
            seed,
            stats.pages_accepted,
            stats.urls_visited,
            stats.failures,
            stats.duplicates,
            stats.elapsed.as_secs_f64()
        );

        Ok(CrawlOutcome::new(pages, stats))
    }

    /// Enqueues a discovered URL if it is crawlable and robots.txt allows it
    fn try_enqueue(&self, frontier: &mut Frontier, robots: &RobotsInfo, url: NormalizedUrl) -> bool {
        if !is_crawlable(url.as_str()) {
            return false;
        }

        if self.config.respect_robots_disallow
            && !robots.is_allowed(url.as_str(), &self.user_agent.crawler_name)
        {
            tracing::debug!("{} disallowed by robots.txt", url);
            return false;
        }

        frontier.enqueue(url)
    }
}

/// Fetches and extracts one page inside a concurrency slot
///
/// Retries, backoff and the crawl-delay all happen while the slot is held.
/// Extraction runs after the slot is released.
async fn crawl_page(context: Arc<PageContext>, url: NormalizedUrl) -> PageResult {
    let permit = match context.semaphore.acquire().await {
        Ok(permit) => permit,
        Err(e) => {
            return PageResult {
                url,
                outcome: Err(e.into()),
            }
        }
    };

    let fetched = fetch_page(
        &context.client,
        url.as_str(),
        &context.retry,
        context.request_timeout,
    )
    .await;

    if let Some(delay) = context.crawl_delay {
        tokio::time::sleep(delay).await;
    }
    drop(permit);

    let outcome = fetched.map_err(CrawlError::from).map(|page| {
        if page.is_html() {
            extract_page(&page.final_url, &page.body, &context.origin)
        } else {
            tracing::debug!("{} is not HTML ({})", url, page.content_type);
            ExtractedPage::default()
        }
    });

    PageResult { url, outcome }
}
