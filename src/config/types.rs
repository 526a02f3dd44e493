use serde::Deserialize;

/// Main configuration structure for Treeline
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub robots: RobotsConfig,
    #[serde(default)]
    pub sitemap: SitemapConfig,
    #[serde(default)]
    pub headers: HeaderConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub redirects: RedirectsConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// The URL the crawl starts from; also defines the origin boundary
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Stop after this many page records; absent means unbounded
    #[serde(rename = "max-pages")]
    pub max_pages: Option<u64>,

    /// Maximum depth from the seed
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Idle interval between fetches, in milliseconds
    #[serde(rename = "delay-ms", default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Per-request timeout, in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Disable to accept invalid TLS certificates
    #[serde(rename = "verify-tls", default = "default_true")]
    pub verify_tls: bool,
}

/// Robots compliance configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RobotsConfig {
    /// Whether robots.txt directives are consulted at all
    #[serde(default = "default_true")]
    pub obey: bool,

    /// Whether robots-blocked URLs still produce placeholder page records
    #[serde(rename = "record-blocked", default = "default_true")]
    pub record_blocked: bool,
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            obey: true,
            record_blocked: true,
        }
    }
}

/// Sitemap seeding configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SitemapConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Sitemap documents to fetch before the crawl loop starts
    #[serde(default)]
    pub urls: Vec<String>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            urls: Vec::new(),
        }
    }
}

/// Outbound request headers
#[derive(Debug, Clone, Deserialize)]
pub struct HeaderConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_accept")]
    pub accept: String,

    #[serde(rename = "accept-language")]
    pub accept_language: Option<String>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept: default_accept(),
            accept_language: None,
        }
    }
}

/// Output location configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving pages.jsonl, edges.jsonl, errors.jsonl, and
    /// hierarchy.json
    #[serde(rename = "data-dir", default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Filtered-report configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReportConfig {
    /// Path prefixes whose pages are excluded from the filtered hierarchy
    #[serde(rename = "exclude-paths", default)]
    pub exclude_paths: Vec<String>,

    /// Where the filtered hierarchy document is written; defaults to
    /// `filtered_hierarchy.json` under the data directory
    #[serde(rename = "output-path")]
    pub output_path: Option<String>,
}

/// Redirect resolver configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedirectsConfig {
    /// Substring a page URL's path must contain to be re-checked
    #[serde(rename = "path-contains", default)]
    pub path_contains: String,

    /// Optional cap on how many URLs are checked
    #[serde(rename = "max-urls")]
    pub max_urls: Option<u64>,

    /// Idle interval between redirect checks, in milliseconds
    #[serde(rename = "delay-ms", default = "default_redirect_delay_ms")]
    pub delay_ms: u64,

    /// Where the redirect report is written; defaults to
    /// `redirects.json` under the data directory
    #[serde(rename = "output-path")]
    pub output_path: Option<String>,
}

impl Default for RedirectsConfig {
    fn default() -> Self {
        Self {
            path_contains: String::new(),
            max_urls: None,
            delay_ms: default_redirect_delay_ms(),
            output_path: None,
        }
    }
}

fn default_max_depth() -> u32 {
    8
}

fn default_delay_ms() -> u64 {
    500
}

fn default_redirect_delay_ms() -> u64 {
    250
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_true() -> bool {
    true
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_user_agent() -> String {
    // A browser-like agent; portals routinely serve crawler agents differently
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

fn default_accept() -> String {
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string()
}
