//! Crawl coordinator - main crawl orchestration logic
//!
//! Owns the frontier, visited set, hierarchy accumulator, and record sink,
//! and drives the breadth-first loop: pop an entry, filter it for scope,
//! consult the robots policy, fetch, extract, enqueue children, emit
//! records. One logical worker, blocking on each network call; the
//! politeness delay between fetches is the only scheduling control.

use crate::config::Config;
use crate::crawler::extractor::{extract_page, PageExtract};
use crate::crawler::fetcher::{build_http_client, fetch_url, is_html_content_type, FetchOutcome};
use crate::crawler::frontier::{Frontier, FrontierEntry, VisitedSet};
use crate::crawler::scope::CrawlScope;
use crate::hierarchy::{HierarchyNode, TreeNode};
use crate::output::{
    EdgeRecord, ErrorRecord, JsonlSink, PageRecord, RecordSink, BLOCKED_BY_ROBOTS,
};
use crate::robots::{load_robots, RobotsPolicy};
use crate::sitemap::{collect_seed_urls, seed_prefix};
use crate::url::{path_segments, resolve_reference};
use crate::TreelineError;
use reqwest::Client;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// File name of the hierarchy document under the data directory
pub const HIERARCHY_FILE: &str = "hierarchy.json";

/// The crawl engine
///
/// Generic over the record sink so the streams can go to JSONL files in
/// production and to memory in tests.
pub struct Crawler<S: RecordSink> {
    config: Config,
    seed: Url,
    scope: CrawlScope,
    client: Client,
    robots: Box<dyn RobotsPolicy>,
    frontier: Frontier,
    visited: VisitedSet,
    hierarchy: HierarchyNode,
    sink: S,
    pages_emitted: u64,
}

impl<S: RecordSink> Crawler<S> {
    /// Creates a crawler and seeds its frontier
    ///
    /// The seed URL enters at depth 0. If sitemap seeding is enabled, the
    /// configured sitemaps are fetched here, once, before the loop, and
    /// their prefix-matching locations enter at depth 1 with the seed as
    /// parent.
    pub async fn new(config: Config, sink: S) -> Result<Self, TreelineError> {
        let seed = Url::parse(&config.crawl.seed_url)?;
        let scope = CrawlScope::new(&seed, config.crawl.max_depth);
        let client = build_http_client(&config)?;
        let robots = load_robots(&client, &seed, config.robots.obey).await;

        let mut frontier = Frontier::new();
        frontier.push(FrontierEntry {
            url: seed.clone(),
            parent: None,
            depth: 0,
        });

        if config.sitemap.enabled && !config.sitemap.urls.is_empty() {
            let prefix = seed_prefix(&seed);
            let locations = collect_seed_urls(&client, &config.sitemap.urls, &prefix).await;
            for location in locations {
                match Url::parse(&location) {
                    Ok(url) => frontier.push(FrontierEntry {
                        url,
                        parent: Some(seed.clone()),
                        depth: 1,
                    }),
                    Err(e) => tracing::debug!("Skipping sitemap location {}: {}", location, e),
                }
            }
        }

        Ok(Self {
            config,
            seed,
            scope,
            client,
            robots,
            frontier,
            visited: VisitedSet::new(),
            hierarchy: HierarchyNode::new(),
            sink,
            pages_emitted: 0,
        })
    }

    /// Runs the crawl loop to completion
    ///
    /// Returns the number of page records emitted. The sink is flushed
    /// before returning even when the loop fails, so an aborted crawl
    /// still leaves complete streams behind.
    pub async fn run(&mut self) -> Result<u64, TreelineError> {
        tracing::info!(
            "Starting crawl of {} (max depth {}, frontier {})",
            self.seed,
            self.config.crawl.max_depth,
            self.frontier.len()
        );

        let loop_result = self.crawl_loop().await;

        if let Err(e) = self.sink.flush() {
            tracing::error!("Failed to flush record sink: {}", e);
        }

        match loop_result {
            Ok(()) => {
                tracing::info!("Crawl complete: {} pages", self.pages_emitted);
                Ok(self.pages_emitted)
            }
            Err(e) => {
                tracing::error!("Crawl aborted after {} pages: {}", self.pages_emitted, e);
                Err(e)
            }
        }
    }

    /// Renders the hierarchy accumulated so far
    ///
    /// The root node is named after the seed's host (with port, if any).
    pub fn hierarchy_tree(&self) -> TreeNode {
        let host = self.seed.host_str().unwrap_or("/");
        let name = match self.seed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        self.hierarchy.to_tree(&name)
    }

    /// Consumes the crawler, returning its sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    async fn crawl_loop(&mut self) -> Result<(), TreelineError> {
        while self.under_page_limit() {
            let entry = match self.frontier.pop() {
                Some(entry) => entry,
                None => break,
            };

            if let Err(reason) = self.scope.admit(&entry.url, entry.depth, &self.visited) {
                tracing::debug!("Skipping {} ({})", entry.url, reason);
                continue;
            }

            self.process_entry(entry).await?;

            if self.pages_emitted % 25 == 0 && self.pages_emitted > 0 {
                tracing::info!(
                    "Progress: {} pages, {} in frontier",
                    self.pages_emitted,
                    self.frontier.len()
                );
            }
        }
        Ok(())
    }

    fn under_page_limit(&self) -> bool {
        match self.config.crawl.max_pages {
            Some(max) => self.pages_emitted < max,
            None => true,
        }
    }

    /// Processes one admitted frontier entry through to its terminal state
    async fn process_entry(&mut self, entry: FrontierEntry) -> Result<(), TreelineError> {
        let user_agent = &self.config.headers.user_agent;
        if self.config.robots.obey && !self.robots.allowed(user_agent, &entry.url) {
            tracing::info!("Blocked by robots.txt: {}", entry.url);
            self.visited.insert(&entry.url);
            if self.config.robots.record_blocked {
                // Placeholder record: the URL stays visible in the stream
                // without a fetch ever happening
                self.sink.record_page(&PageRecord {
                    url: entry.url.to_string(),
                    status_code: None,
                    title: BLOCKED_BY_ROBOTS.to_string(),
                    meta_description: BLOCKED_BY_ROBOTS.to_string(),
                    canonical: None,
                    parent_url: entry.parent.as_ref().map(Url::to_string),
                    depth: entry.depth,
                })?;
                self.pages_emitted += 1;
            }
            return Ok(());
        }

        let mut status_code = None;
        let mut extract = PageExtract::empty();
        let mut children: Vec<Url> = Vec::new();

        match fetch_url(&self.client, &entry.url).await {
            FetchOutcome::Fetched {
                final_url,
                status,
                content_type,
                body,
            } => {
                status_code = Some(status);
                tracing::debug!("GET {} -> {} {}", entry.url, status, content_type);

                if is_html_content_type(&content_type) && !body.is_empty() {
                    extract = extract_page(&body);
                    // Children resolve against the URL actually reached,
                    // so relative links survive redirects
                    for href in &extract.links {
                        match resolve_reference(&final_url, href) {
                            Ok(candidate) if self.scope.contains(&candidate) => {
                                children.push(candidate);
                            }
                            Ok(candidate) => {
                                tracing::trace!("Dropping out-of-origin link {}", candidate);
                            }
                            Err(e) => {
                                tracing::debug!("Dropping link on {}: {}", entry.url, e);
                            }
                        }
                    }
                } else {
                    tracing::debug!("Non-HTML or empty body at {}", entry.url);
                }
            }
            FetchOutcome::NetworkError { error } => {
                tracing::error!("Fetch failed for {}: {}", entry.url, error);
                self.sink.record_error(&ErrorRecord {
                    url: entry.url.to_string(),
                    error,
                })?;
            }
        }

        self.visited.insert(&entry.url);
        self.sink.record_page(&PageRecord {
            url: entry.url.to_string(),
            status_code,
            title: extract.title,
            meta_description: extract.meta_description,
            canonical: extract.canonical,
            parent_url: entry.parent.as_ref().map(Url::to_string),
            depth: entry.depth,
        })?;
        self.pages_emitted += 1;

        self.hierarchy.insert(path_segments(&entry.url));

        for child in children {
            // Visited-set membership is checked per discovery event: a
            // target already sitting in the frontier is enqueued (and its
            // edge recorded) again until it is actually processed
            if !self.visited.contains(&child) {
                self.sink.record_edge(&EdgeRecord {
                    source: entry.url.to_string(),
                    target: child.to_string(),
                })?;
                self.frontier.push(FrontierEntry {
                    url: child,
                    parent: Some(entry.url.clone()),
                    depth: entry.depth + 1,
                });
            }
        }

        if self.config.crawl.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.crawl.delay_ms)).await;
        }

        Ok(())
    }
}

/// Runs a complete crawl against the configured data directory
///
/// Streams records through a [`JsonlSink`] and writes the hierarchy
/// document after the loop exits. The hierarchy reflects whatever state
/// accumulated even when the loop aborts: the document is written before
/// the error propagates.
pub async fn run_crawl(config: Config) -> Result<u64, TreelineError> {
    let data_dir = PathBuf::from(&config.output.data_dir);
    let sink = JsonlSink::create(&data_dir).map_err(TreelineError::Output)?;

    let mut crawler = Crawler::new(config, sink).await?;
    let crawl_result = crawler.run().await;

    let tree = crawler.hierarchy_tree();
    let hierarchy_path = data_dir.join(HIERARCHY_FILE);
    let mut writer = std::io::BufWriter::new(std::fs::File::create(&hierarchy_path)?);
    serde_json::to_writer_pretty(&mut writer, &tree)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    tracing::info!("Hierarchy written to {}", hierarchy_path.display());

    crawl_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemorySink;

    fn test_config(seed: &str) -> Config {
        let toml = format!(
            r#"
[crawl]
seed-url = "{}"
delay-ms = 0

[robots]
obey = false

[sitemap]
enabled = false
"#,
            seed
        );
        toml::from_str(&toml).unwrap()
    }

    #[tokio::test]
    async fn test_crawler_seeds_frontier_with_seed_url() {
        let config = test_config("https://example.com/personas");
        let crawler = Crawler::new(config, MemorySink::new()).await.unwrap();
        assert_eq!(crawler.frontier.len(), 1);
    }

    #[tokio::test]
    async fn test_hierarchy_root_named_after_host() {
        let config = test_config("https://example.com/personas");
        let crawler = Crawler::new(config, MemorySink::new()).await.unwrap();
        assert_eq!(crawler.hierarchy_tree().name, "example.com");
    }

    #[tokio::test]
    async fn test_hierarchy_root_includes_port() {
        let config = test_config("http://127.0.0.1:8123/x");
        let crawler = Crawler::new(config, MemorySink::new()).await.unwrap();
        assert_eq!(crawler.hierarchy_tree().name, "127.0.0.1:8123");
    }
}
