//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: the `Discovering -> Crawling -> Completed` lifecycle of one crawl

mod crawl_phase;

pub use crawl_phase::CrawlPhase;
