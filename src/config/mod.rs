//! Configuration module for Treeline
//!
//! Loads one immutable [`Config`] value from a TOML file; components
//! receive it (or the section they need) at construction time.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{
    Config, CrawlConfig, HeaderConfig, OutputConfig, RedirectsConfig, ReportConfig, RobotsConfig,
    SitemapConfig,
};
pub use validation::validate;
