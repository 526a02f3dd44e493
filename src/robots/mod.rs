//! Robots policy adapter
//!
//! Wraps the origin's robots.txt directives behind a small trait so the
//! crawl loop only ever asks one question: may this agent fetch this URL?
//! The policy fails open: a site whose robots.txt cannot be read must
//! not halt the crawl.

mod policy;

pub use policy::{AllowAll, RobotsTxtPolicy};

use reqwest::Client;
use url::Url;

/// Per-URL, per-agent fetch permission
///
/// Backends are substitutable: the robots.txt-backed implementation, the
/// no-op [`AllowAll`], or anything else constructed from a directives
/// source.
pub trait RobotsPolicy: Send + Sync {
    /// Returns whether `user_agent` may fetch `url`
    fn allowed(&self, user_agent: &str, url: &Url) -> bool;
}

/// Loads the robots policy for the seed's origin
///
/// When `enabled` is false no request is made and the returned policy
/// allows everything. When the robots.txt fetch fails or returns a
/// non-success status, a warning is logged and the policy fails open.
pub async fn load_robots(client: &Client, seed: &Url, enabled: bool) -> Box<dyn RobotsPolicy> {
    if !enabled {
        tracing::debug!("Robots compliance disabled, allowing all URLs");
        return Box::new(AllowAll);
    }

    let robots_url = match seed.join("/robots.txt") {
        Ok(u) => u,
        Err(e) => {
            tracing::warn!("Could not build robots.txt URL from seed: {}", e);
            return Box::new(AllowAll);
        }
    };

    match client.get(robots_url.clone()).send().await {
        Ok(response) if response.status().is_success() => match response.text().await {
            Ok(body) => {
                tracing::info!("Loaded robots.txt from {}", robots_url);
                Box::new(RobotsTxtPolicy::from_content(&body))
            }
            Err(e) => {
                tracing::warn!("Failed to read robots.txt body: {}", e);
                Box::new(AllowAll)
            }
        },
        Ok(response) => {
            tracing::warn!(
                "robots.txt at {} returned {}, failing open",
                robots_url,
                response.status()
            );
            Box::new(AllowAll)
        }
        Err(e) => {
            tracing::warn!("Failed to fetch robots.txt: {}, failing open", e);
            Box::new(AllowAll)
        }
    }
}
