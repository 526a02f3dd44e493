use serde::{Deserialize, Serialize};

/// Placeholder title for pages without a `<title>` tag
pub const NO_TITLE: &str = "NO_TITLE";

/// Placeholder description for pages without a usable meta description
pub const NO_DESCRIPTION: &str = "NO_DESCRIPTION";

/// Placeholder title and description for pages skipped under robots policy
pub const BLOCKED_BY_ROBOTS: &str = "BLOCKED_BY_ROBOTS";

/// One record per URL dequeued and processed by the crawl loop
///
/// Emitted exactly once per URL: after a fetch attempt (successful or not),
/// or for a robots-blocked URL when recording blocked URLs is enabled.
/// Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,

    /// HTTP status of the fetch; `None` when no response was obtained
    /// (network failure or robots-blocked placeholder)
    pub status_code: Option<u16>,

    pub title: String,

    pub meta_description: String,

    /// Href of the page's canonical link tag, as written (not normalized)
    pub canonical: Option<String>,

    /// URL of the page this one was discovered from; `None` for the seed
    pub parent_url: Option<String>,

    pub depth: u32,
}

/// One record per link-discovery event from a fetched page
///
/// An edge is written each time an extraction pass observes a same-origin
/// child that is not yet visited, even if that child is already sitting in
/// the frontier. Edges count discovery events, not unique links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
}

/// One record per request-level fetch failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub url: String,

    /// Human-readable transport error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_record_round_trip() {
        let record = PageRecord {
            url: "https://example.com/personas".to_string(),
            status_code: Some(200),
            title: "Personas".to_string(),
            meta_description: NO_DESCRIPTION.to_string(),
            canonical: None,
            parent_url: None,
            depth: 0,
        };

        let line = serde_json::to_string(&record).unwrap();
        let parsed: PageRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_page_record_null_fields() {
        let record = PageRecord {
            url: "https://example.com/x".to_string(),
            status_code: None,
            title: BLOCKED_BY_ROBOTS.to_string(),
            meta_description: BLOCKED_BY_ROBOTS.to_string(),
            canonical: None,
            parent_url: Some("https://example.com/".to_string()),
            depth: 1,
        };

        let value: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert!(value["status_code"].is_null());
        assert!(value["canonical"].is_null());
        assert_eq!(value["parent_url"], "https://example.com/");
    }

    #[test]
    fn test_edge_record_fields() {
        let edge = EdgeRecord {
            source: "https://example.com/".to_string(),
            target: "https://example.com/a".to_string(),
        };
        let value: serde_json::Value = serde_json::to_value(&edge).unwrap();
        assert_eq!(value["source"], "https://example.com/");
        assert_eq!(value["target"], "https://example.com/a");
    }
}
