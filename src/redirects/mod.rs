//! Post-hoc redirect resolution
//!
//! Reads the page stream back, selects records whose URL path contains the
//! configured substring, and re-fetches each one independently to record
//! where it actually lands after redirects. Produces a single JSON
//! document with a summary block and the per-URL detail.

use crate::config::Config;
use crate::crawler::build_http_client;
use crate::output::{PageRecord, PAGES_FILE};
use crate::{Result, TreelineError};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default file name of the redirect report under the data directory
pub const REDIRECTS_FILE: &str = "redirects.json";

/// Where one source URL ended up
#[derive(Debug, Clone, Serialize)]
pub struct RedirectMapping {
    pub source_url: String,

    /// URL reached after following redirects; `None` when the check failed
    pub final_url: Option<String>,

    pub has_redirect: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate counts over all checked URLs
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RedirectSummary {
    pub total_urls_checked: u64,
    pub urls_with_redirect: u64,
    pub urls_without_redirect: u64,
    pub errors: u64,
}

/// The complete redirect report document
#[derive(Debug, Serialize)]
pub struct RedirectReport {
    pub summary: RedirectSummary,
    pub redirects: Vec<RedirectMapping>,
}

/// Whether a URL's path contains the filter substring
///
/// Falls back to matching against the whole string when the URL does not
/// parse, so damaged records can still be selected.
fn path_matches(url: &str, needle: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().contains(needle),
        Err(_) => url.contains(needle),
    }
}

/// Re-checks every matching page-stream URL and collects the mappings
pub async fn resolve_redirects(config: &Config) -> Result<RedirectReport> {
    let needle = &config.redirects.path_contains;
    if needle.is_empty() {
        return Err(TreelineError::Input(
            "redirects path-contains is not configured".to_string(),
        ));
    }

    let pages_path = PathBuf::from(&config.output.data_dir).join(PAGES_FILE);
    let reader = BufReader::new(File::open(&pages_path)?);

    let client = build_http_client(config)?;

    let mut summary = RedirectSummary::default();
    let mut redirects = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let record: PageRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(_) => continue,
        };

        if !path_matches(&record.url, needle) {
            continue;
        }

        if let Some(max) = config.redirects.max_urls {
            if summary.total_urls_checked >= max {
                break;
            }
        }

        summary.total_urls_checked += 1;

        let mapping = check_url(&client, &record.url).await;
        if mapping.error.is_some() {
            summary.errors += 1;
        } else if mapping.has_redirect {
            summary.urls_with_redirect += 1;
            tracing::info!(
                "Redirect: {} -> {}",
                mapping.source_url,
                mapping.final_url.as_deref().unwrap_or("?")
            );
        }
        redirects.push(mapping);

        if config.redirects.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(config.redirects.delay_ms)).await;
        }
    }

    summary.urls_without_redirect = summary
        .total_urls_checked
        .saturating_sub(summary.urls_with_redirect + summary.errors);

    Ok(RedirectReport { summary, redirects })
}

async fn check_url(client: &reqwest::Client, source_url: &str) -> RedirectMapping {
    match client.get(source_url).send().await {
        Ok(response) => {
            let final_url = response.url().to_string();
            let has_redirect = final_url != source_url;
            RedirectMapping {
                source_url: source_url.to_string(),
                final_url: Some(final_url),
                has_redirect,
                error: None,
            }
        }
        Err(e) => {
            tracing::error!("Redirect check failed for {}: {}", source_url, e);
            RedirectMapping {
                source_url: source_url.to_string(),
                final_url: None,
                has_redirect: false,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Resolves redirects and writes the report document
pub async fn run_redirect_resolver(config: &Config) -> Result<RedirectReport> {
    let report = resolve_redirects(config).await?;

    let output_path = config
        .redirects
        .output_path
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&config.output.data_dir).join(REDIRECTS_FILE));

    let mut writer = BufWriter::new(File::create(&output_path)?);
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!(
        "Redirect report written to {} ({} checked, {} redirected, {} errors)",
        output_path.display(),
        report.summary.total_urls_checked,
        report.summary.urls_with_redirect,
        report.summary.errors
    );

    Ok(report)
}
