//! Crawl scope filtering
//!
//! Decides whether a dequeued URL is eligible for processing. The checks
//! run in a fixed order (cross-origin, then depth, then duplicate) so the skip
//! reason in the logs is unambiguous; the order has no effect on which
//! URLs are ultimately processed.

use crate::crawler::frontier::VisitedSet;
use url::{Origin, Url};

/// Why a frontier entry was skipped without producing a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Scheme+host(+port) differs from the seed's
    CrossOrigin,
    /// Entry depth exceeds the configured maximum
    DepthExceeded,
    /// URL was already finalized by an earlier entry
    AlreadyVisited,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::CrossOrigin => write!(f, "cross-origin"),
            SkipReason::DepthExceeded => write!(f, "depth exceeded"),
            SkipReason::AlreadyVisited => write!(f, "already visited"),
        }
    }
}

/// Immutable scope parameters derived from the seed URL
#[derive(Debug, Clone)]
pub struct CrawlScope {
    origin: Origin,
    max_depth: u32,
}

impl CrawlScope {
    pub fn new(seed: &Url, max_depth: u32) -> Self {
        Self {
            origin: seed.origin(),
            max_depth,
        }
    }

    /// Whether a URL lies within the seed's origin
    pub fn contains(&self, url: &Url) -> bool {
        url.origin() == self.origin
    }

    /// Checks eligibility of a dequeued entry; no side effects
    pub fn admit(
        &self,
        url: &Url,
        depth: u32,
        visited: &VisitedSet,
    ) -> Result<(), SkipReason> {
        if !self.contains(url) {
            return Err(SkipReason::CrossOrigin);
        }
        if depth > self.max_depth {
            return Err(SkipReason::DepthExceeded);
        }
        if visited.contains(url) {
            return Err(SkipReason::AlreadyVisited);
        }
        Ok(())
    }
}
