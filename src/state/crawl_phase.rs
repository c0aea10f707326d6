/// Crawl phase definitions for tracking crawl progress
///
/// This module defines the phases one crawl invocation moves through.
use crate::CrawlError;
use std::fmt;

/// Represents the current phase of a crawl
///
/// A crawl only ever moves forward: `Discovering -> Crawling -> Completed`.
/// There is no failed phase; per-page errors are recovered inside `Crawling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Fetching robots.txt and expanding sitemaps to seed the frontier
    Discovering,

    /// Fetching batches of frontier URLs
    Crawling,

    /// Frontier exhausted or page budget met
    Completed,
}

impl CrawlPhase {
    /// Returns true if no further work happens in this phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns true if `next` directly follows this phase
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Discovering, Self::Crawling) | (Self::Crawling, Self::Completed)
        )
    }

    /// Moves to the next phase
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlPhase)` - The new phase
    /// * `Err(CrawlError::InvalidTransition)` - `next` does not follow this phase
    pub fn transition(self, next: CrawlPhase) -> Result<CrawlPhase, CrawlError> {
        if self.can_transition_to(next) {
            tracing::debug!("Crawl phase {} -> {}", self, next);
            Ok(next)
        } else {
            Err(CrawlError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Discovering => "discovering",
            Self::Crawling => "crawling",
            Self::Completed => "completed",
        };
        f.write_str(name)
    }
}
