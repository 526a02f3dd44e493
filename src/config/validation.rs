use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates a parsed configuration
///
/// Checks the fields whose invalid values would otherwise surface as
/// confusing failures deep inside the crawl:
/// - the seed URL must parse, use http or https, and carry a host
/// - the request timeout must be nonzero
/// - sitemap URLs must parse when seeding is enabled
/// - report exclusion prefixes must start with `/`
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let seed = Url::parse(&config.crawl.seed_url).map_err(|e| {
        ConfigError::Validation(format!("seed-url {:?}: {}", config.crawl.seed_url, e))
    })?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "seed-url must be http or https, got {}",
            seed.scheme()
        )));
    }

    if seed.host_str().is_none() {
        return Err(ConfigError::Validation(
            "seed-url has no host".to_string(),
        ));
    }

    if config.crawl.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be greater than zero".to_string(),
        ));
    }

    if config.sitemap.enabled {
        for sitemap_url in &config.sitemap.urls {
            Url::parse(sitemap_url).map_err(|e| {
                ConfigError::Validation(format!("sitemap url {:?}: {}", sitemap_url, e))
            })?;
        }
    }

    for prefix in &config.report.exclude_paths {
        if !prefix.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "report exclude path {:?} must start with '/'",
                prefix
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::CrawlConfig;

    fn base_config(seed: &str) -> Config {
        Config {
            crawl: CrawlConfig {
                seed_url: seed.to_string(),
                max_pages: None,
                max_depth: 8,
                delay_ms: 500,
                request_timeout_secs: 20,
                verify_tls: true,
            },
            robots: Default::default(),
            sitemap: Default::default(),
            headers: Default::default(),
            output: Default::default(),
            report: Default::default(),
            redirects: Default::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = base_config("https://example.com/personas");
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_unparseable_seed() {
        let config = base_config("not a url");
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = base_config("ftp://example.com/files");
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = base_config("https://example.com/");
        config.crawl.request_timeout_secs = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_bad_sitemap_url() {
        let mut config = base_config("https://example.com/");
        config.sitemap.urls.push("::::".to_string());
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_ignores_sitemap_urls_when_disabled() {
        let mut config = base_config("https://example.com/");
        config.sitemap.enabled = false;
        config.sitemap.urls.push("::::".to_string());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_relative_exclude_path() {
        let mut config = base_config("https://example.com/");
        config.report.exclude_paths.push("wps".to_string());
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }
}
