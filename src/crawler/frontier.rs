//! Frontier queue and visited-set tracking
//!
//! The frontier is a plain FIFO queue: traversal order is pure BFS with
//! ties broken by enqueue order. The visited set is the sole deduplication
//! authority; URLs are added when they are finalized (fetch-attempted or
//! robots-blocked), not when enqueued, so a URL may sit in the frontier
//! more than once before collapsing at dequeue time.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// One queued unit of crawl work
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    pub url: Url,

    /// The page this URL was discovered on; `None` for the seed
    pub parent: Option<Url>,

    /// Link distance from the seed
    pub depth: u32,
}

/// FIFO queue of not-yet-processed frontier entries
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: FrontierEntry) {
        self.queue.push_back(entry);
    }

    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Set of URLs already finalized by the crawl loop
///
/// Grows monotonically; never shrinks.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a URL as finalized
    pub fn insert(&mut self, url: &Url) {
        self.urls.insert(url.as_str().to_string());
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.urls.contains(url.as_str())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
