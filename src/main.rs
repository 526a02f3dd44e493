//! Treeline main entry point
//!
//! Command-line interface for the Treeline single-origin site mapper.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use treeline::config::load_config;
use treeline::crawler::run_crawl;
use treeline::redirects::run_redirect_resolver;
use treeline::report::run_filter_report;

/// Treeline: a single-origin site structure mapper
///
/// Treeline crawls one origin breadth-first from a seed URL and streams
/// page, edge, and error records as line-delimited JSON, alongside a
/// path-segment hierarchy tree of the site's structure.
#[derive(Parser, Debug)]
#[command(name = "treeline")]
#[command(version)]
#[command(about = "A single-origin site structure mapper", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the configured origin and write the record streams
    Crawl {
        /// Path to TOML configuration file
        #[arg(value_name = "CONFIG")]
        config: PathBuf,
    },

    /// Rebuild the hierarchy from the page stream, excluding configured
    /// path prefixes
    FilterReport {
        /// Path to TOML configuration file
        #[arg(value_name = "CONFIG")]
        config: PathBuf,
    },

    /// Re-fetch page-stream URLs matching the configured path filter and
    /// record their redirect targets
    ResolveRedirects {
        /// Path to TOML configuration file
        #[arg(value_name = "CONFIG")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Crawl { config } => {
            let config = load_config(&config)
                .with_context(|| format!("failed to load {}", config.display()))?;
            let pages = run_crawl(config).await?;
            println!("Crawl finished: {} pages", pages);
        }
        Command::FilterReport { config } => {
            let config = load_config(&config)
                .with_context(|| format!("failed to load {}", config.display()))?;
            let stats = run_filter_report(&config)?;
            println!(
                "Filtered report: {} included, {} excluded of {} pages",
                stats.included, stats.excluded, stats.total
            );
        }
        Command::ResolveRedirects { config } => {
            let config = load_config(&config)
                .with_context(|| format!("failed to load {}", config.display()))?;
            let report = run_redirect_resolver(&config).await?;
            println!(
                "Redirects: {} checked, {} redirected, {} errors",
                report.summary.total_urls_checked,
                report.summary.urls_with_redirect,
                report.summary.errors
            );
        }
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("treeline=info,warn"),
            1 => EnvFilter::new("treeline=debug,info"),
            2 => EnvFilter::new("treeline=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
