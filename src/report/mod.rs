//! Filtered hierarchy reports
//!
//! Post-hoc consumer of the page stream: rebuilds a hierarchy tree from
//! `pages.jsonl` while excluding records whose URL path falls under any of
//! the configured path prefixes. The insert and render algorithm is the
//! crawl's own [`HierarchyNode`], so a report built with no exclusions is
//! identical to the crawl's hierarchy document.

use crate::config::Config;
use crate::hierarchy::{HierarchyNode, TreeNode};
use crate::output::{PageRecord, PAGES_FILE};
use crate::{Result, TreelineError};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use url::Url;

/// Default file name of the filtered hierarchy document
pub const FILTERED_HIERARCHY_FILE: &str = "filtered_hierarchy.json";

/// Counts of page records seen while building a filtered report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub total: u64,
    pub included: u64,
    pub excluded: u64,
}

/// Whether a URL path falls under any exclusion prefix
///
/// A prefix matches the path itself or any deeper path below it, so `/s`
/// excludes `/s` and `/s/minisitios` but not `/services`.
pub fn is_excluded(path: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| {
        path == prefix || path.starts_with(&format!("{}/", prefix))
    })
}

/// Builds a filtered hierarchy tree from a page stream
///
/// Lines that fail to parse are skipped, matching the crawl's tolerance
/// for truncated streams.
pub fn build_filtered_tree(
    pages_path: &Path,
    exclude: &[String],
    root_name: &str,
) -> Result<(TreeNode, FilterStats)> {
    let file = File::open(pages_path)?;
    let reader = BufReader::new(file);

    let mut root = HierarchyNode::new();
    let mut stats = FilterStats::default();

    for line in reader.lines() {
        let line = line?;
        let record: PageRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(_) => continue,
        };

        stats.total += 1;

        let path = match Url::parse(&record.url) {
            Ok(url) => url.path().to_string(),
            Err(_) => {
                stats.excluded += 1;
                continue;
            }
        };

        if is_excluded(&path, exclude) {
            stats.excluded += 1;
            continue;
        }

        stats.included += 1;
        root.insert(path.split('/'));
    }

    Ok((root.to_tree(root_name), stats))
}

/// Builds and writes the filtered hierarchy document for a configuration
pub fn run_filter_report(config: &Config) -> Result<FilterStats> {
    let seed = Url::parse(&config.crawl.seed_url)?;
    let root_name = seed
        .host_str()
        .ok_or_else(|| TreelineError::Input("seed URL has no host".to_string()))?
        .to_string();

    let data_dir = PathBuf::from(&config.output.data_dir);
    let pages_path = data_dir.join(PAGES_FILE);
    let output_path = config
        .report
        .output_path
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join(FILTERED_HIERARCHY_FILE));

    let (tree, stats) = build_filtered_tree(&pages_path, &config.report.exclude_paths, &root_name)?;

    let mut writer = BufWriter::new(File::create(&output_path)?);
    serde_json::to_writer_pretty(&mut writer, &tree)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!(
        "Filtered hierarchy written to {} ({} included, {} excluded of {})",
        output_path.display(),
        stats.included,
        stats.excluded,
        stats.total
    );

    Ok(stats)
}
