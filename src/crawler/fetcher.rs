//! HTTP fetcher
//!
//! One GET per URL, redirects followed transparently. A non-2xx status is
//! not an error at this layer; it is recorded faithfully in the page
//! record; only transport-level failures surface as `NetworkError`.

use crate::config::Config;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// A response was obtained (any status code)
    Fetched {
        /// URL actually reached, after redirects
        final_url: Url,
        status: u16,
        /// Content-Type header value, empty if absent
        content_type: String,
        body: String,
    },

    /// Transport-level failure: timeout, connection, TLS
    NetworkError { error: String },
}

/// Builds the HTTP client used for the whole crawl
///
/// Configures the outbound identity (user agent, accept headers), the
/// request timeout, TLS verification, compression, and a transparent
/// redirect policy capped at 10 hops.
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&config.headers.accept) {
        headers.insert(ACCEPT, value);
    }
    if let Some(lang) = &config.headers.accept_language {
        if let Ok(value) = HeaderValue::from_str(lang) {
            headers.insert(ACCEPT_LANGUAGE, value);
        }
    }

    Client::builder()
        .user_agent(config.headers.user_agent.clone())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.crawl.request_timeout_secs))
        .redirect(Policy::limited(10))
        .danger_accept_invalid_certs(!config.crawl.verify_tls)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, following redirects
pub async fn fetch_url(client: &Client, url: &Url) -> FetchOutcome {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let final_url = response.url().clone();
            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();

            match response.text().await {
                Ok(body) => FetchOutcome::Fetched {
                    final_url,
                    status,
                    content_type,
                    body,
                },
                Err(e) => FetchOutcome::NetworkError {
                    error: format!("Failed to read response body: {}", e),
                },
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                format!("Request timeout for {}", url)
            } else if e.is_connect() {
                format!("Connection failed for {}", url)
            } else {
                e.to_string()
            };
            FetchOutcome::NetworkError { error }
        }
    }
}

/// Whether a Content-Type header denotes an HTML document
pub fn is_html_content_type(content_type: &str) -> bool {
    let lower = content_type.to_lowercase();
    lower.contains("text/html") || lower.contains("application/xhtml")
}
