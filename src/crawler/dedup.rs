//! Content deduplication by text fingerprint
//!
//! Two URLs serving the same text (`/about` and `/about/index.html`, tracking
//! parameters, mirrored paths) are accepted once.

use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt;

/// SHA-256 of a page's extracted text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn of(text: &str) -> Self {
        let digest = Sha256::digest(text.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Fingerprints of every accepted page in one crawl
#[derive(Debug, Default)]
pub struct ContentDeduplicator {
    seen: HashSet<Fingerprint>,
}

impl ContentDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fingerprint
    ///
    /// Returns false if the same content was already accepted.
    pub fn insert(&mut self, fingerprint: Fingerprint) -> bool {
        self.seen.insert(fingerprint)
    }
}
