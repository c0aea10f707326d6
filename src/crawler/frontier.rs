//! Frontier for managing the crawl queue
//!
//! This module handles:
//! - FIFO ordering of URLs waiting to be fetched
//! - The `queued` guard: a URL enters the queue at most once per crawl
//! - The `visited` set: a URL is dispatched to a fetch at most once per crawl

use crate::url::NormalizedUrl;
use std::collections::{HashSet, VecDeque};

/// Frontier owns the queue and the sets guarding it
///
/// Only the orchestrator task touches the frontier, so it needs no locking.
#[derive(Debug, Default)]
pub struct Frontier {
    /// URLs waiting to be fetched, in discovery order
    queue: VecDeque<NormalizedUrl>,

    /// Every URL ever enqueued
    queued: HashSet<NormalizedUrl>,

    /// Every URL dispatched to a fetch
    visited: HashSet<NormalizedUrl>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a URL to the back of the queue
    ///
    /// Returns false if the URL was already enqueued at some point.
    pub fn enqueue(&mut self, url: NormalizedUrl) -> bool {
        if self.queued.contains(&url) {
            return false;
        }
        self.queued.insert(url.clone());
        self.queue.push_back(url);
        true
    }

    /// Pops up to `max` unvisited URLs and marks them visited
    pub fn next_batch(&mut self, max: usize) -> Vec<NormalizedUrl> {
        let mut batch = Vec::with_capacity(max.min(self.queue.len()));

        while batch.len() < max {
            let Some(url) = self.queue.pop_front() else {
                break;
            };
            if self.visited.insert(url.clone()) {
                batch.push(url);
            }
        }

        batch
    }

    /// Returns the number of URLs waiting in the queue
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
