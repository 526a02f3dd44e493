//! Crawler module: the breadth-first crawl engine
//!
//! This module contains the core crawl machinery:
//! - Frontier queue and visited-set tracking
//! - Scope filtering (origin, depth, dedup)
//! - HTTP fetching
//! - HTML metadata and link extraction
//! - The coordinator running the main loop

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;
mod scope;

pub use coordinator::{run_crawl, Crawler};
pub use extractor::{extract_page, PageExtract};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome};
pub use frontier::{Frontier, FrontierEntry, VisitedSet};
pub use scope::{CrawlScope, SkipReason};
