//! Sitemap-based frontier seeding
//!
//! Fetches the configured sitemap documents once, before the crawl loop,
//! and extracts every listed location under the seed's path prefix. The
//! resulting URLs enter the frontier at depth 1 so they compete with
//! BFS-discovered children in FIFO order.

use reqwest::Client;
use sitemap::reader::{SiteMapEntity, SiteMapReader};
use std::collections::BTreeSet;
use std::io::Cursor;
use url::Url;

/// Builds the seed path prefix used to filter sitemap locations
///
/// The prefix is origin + seed path: for a seed of
/// `https://example.com/personas?x=1` it is
/// `https://example.com/personas`.
pub fn seed_prefix(seed: &Url) -> String {
    format!("{}{}", seed.origin().ascii_serialization(), seed.path())
}

/// Fetches all configured sitemaps and returns the seedable locations
///
/// Each sitemap is fetched independently; a fetch failure or non-success
/// status is logged and that source skipped, degrading gracefully to
/// BFS-only discovery. Locations are filtered to the seed prefix,
/// deduplicated, and returned sorted for determinism.
pub async fn collect_seed_urls(
    client: &Client,
    sitemap_urls: &[String],
    prefix: &str,
) -> Vec<String> {
    let mut locations = BTreeSet::new();

    for sitemap_url in sitemap_urls {
        let body = match fetch_sitemap(client, sitemap_url).await {
            Some(body) => body,
            None => continue,
        };

        let found = parse_locations(body.as_bytes());
        tracing::info!("Sitemap {}: {} locations", sitemap_url, found.len());

        for loc in found {
            if loc.starts_with(prefix) {
                locations.insert(loc);
            }
        }
    }

    tracing::info!("Sitemap locations under seed prefix: {}", locations.len());
    locations.into_iter().collect()
}

async fn fetch_sitemap(client: &Client, sitemap_url: &str) -> Option<String> {
    match client.get(sitemap_url).send().await {
        Ok(response) => {
            let status = response.status();
            tracing::info!("Sitemap GET {} -> {}", sitemap_url, status);
            if !status.is_success() {
                return None;
            }
            match response.text().await {
                Ok(body) => Some(body),
                Err(e) => {
                    tracing::warn!("Sitemap body error {}: {}", sitemap_url, e);
                    None
                }
            }
        }
        Err(e) => {
            tracing::warn!("Sitemap error {}: {}", sitemap_url, e);
            None
        }
    }
}

/// Extracts every `<loc>` from a sitemap document
///
/// Both URL entries and nested sitemap-index entries contribute their
/// location; the prefix filter downstream decides what is actually
/// seedable. Malformed XML simply yields whatever entities were readable.
fn parse_locations(xml: &[u8]) -> Vec<String> {
    let mut locations = Vec::new();

    for entity in SiteMapReader::new(Cursor::new(xml)) {
        match entity {
            SiteMapEntity::Url(entry) => {
                if let Some(loc) = entry.loc.get_url() {
                    locations.push(loc.to_string());
                }
            }
            SiteMapEntity::SiteMap(entry) => {
                if let Some(loc) = entry.loc.get_url() {
                    locations.push(loc.to_string());
                }
            }
            SiteMapEntity::Err(e) => {
                tracing::debug!("Sitemap parse entity error: {:?}", e);
            }
        }
    }

    locations
}
