//! HTML metadata and link extraction
//!
//! Pulls title, meta description, canonical link, and anchor hrefs out of
//! a fetched body. Extraction never fails: malformed markup is absorbed by
//! the lenient parser and missing fields fall back to sentinel values.

use crate::output::{NO_DESCRIPTION, NO_TITLE};
use scraper::{Html, Selector};

/// What the extractor recovered from one page
#[derive(Debug, Clone)]
pub struct PageExtract {
    /// Title text, or [`NO_TITLE`]
    pub title: String,

    /// Meta description, or [`NO_DESCRIPTION`]
    pub meta_description: String,

    /// Canonical link href as written, trimmed
    pub canonical: Option<String>,

    /// Raw anchor hrefs in document order, one entry per occurrence.
    /// Normalization and scope filtering are the caller's job.
    pub links: Vec<String>,
}

impl PageExtract {
    /// The extract of a page with no usable content (non-HTML, empty body,
    /// robots-blocked placeholder, failed fetch)
    pub fn empty() -> Self {
        Self {
            title: NO_TITLE.to_string(),
            meta_description: NO_DESCRIPTION.to_string(),
            canonical: None,
            links: Vec::new(),
        }
    }
}

/// Parses an HTML body and extracts page metadata and outbound hrefs
pub fn extract_page(html: &str) -> PageExtract {
    let document = Html::parse_document(html);

    PageExtract {
        title: extract_title(&document),
        meta_description: extract_meta_description(&document),
        canonical: extract_canonical(&document),
        links: extract_hrefs(&document),
    }
}

fn extract_title(document: &Html) -> String {
    let selector = match Selector::parse("title") {
        Ok(s) => s,
        Err(_) => return NO_TITLE.to_string(),
    };

    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

/// Meta description lookup, in priority order:
/// `name="description"`, then `property="og:description"`, then the
/// capitalized `name="Description"` variant some CMSes emit. The first tag
/// present wins; a present tag with empty content yields the sentinel
/// rather than falling through.
fn extract_meta_description(document: &Html) -> String {
    const SELECTORS: &[&str] = &[
        r#"meta[name="description"]"#,
        r#"meta[property="og:description"]"#,
        r#"meta[name="Description"]"#,
    ];

    for selector_str in SELECTORS {
        let selector = match Selector::parse(selector_str) {
            Ok(s) => s,
            Err(_) => continue,
        };
        if let Some(element) = document.select(&selector).next() {
            return element
                .value()
                .attr("content")
                .map(str::trim)
                .filter(|content| !content.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| NO_DESCRIPTION.to_string());
        }
    }

    NO_DESCRIPTION.to_string()
}

fn extract_canonical(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"link[rel~="canonical"]"#).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
}

fn extract_hrefs(document: &Html) -> Vec<String> {
    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title() {
        let extract = extract_page("<html><head><title> Cuentas </title></head></html>");
        assert_eq!(extract.title, "Cuentas");
    }

    #[test]
    fn test_missing_title_yields_sentinel() {
        let extract = extract_page("<html><head></head><body>x</body></html>");
        assert_eq!(extract.title, NO_TITLE);
    }

    #[test]
    fn test_empty_title_yields_sentinel() {
        let extract = extract_page("<html><head><title>   </title></head></html>");
        assert_eq!(extract.title, NO_TITLE);
    }

    #[test]
    fn test_meta_description_by_name() {
        let html = r#"<html><head><meta name="description" content="Primary"></head></html>"#;
        assert_eq!(extract_page(html).meta_description, "Primary");
    }

    #[test]
    fn test_meta_description_falls_through_to_og() {
        let html = r#"<html><head><meta property="og:description" content="Social"></head></html>"#;
        assert_eq!(extract_page(html).meta_description, "Social");
    }

    #[test]
    fn test_meta_description_falls_through_to_capitalized() {
        let html = r#"<html><head><meta name="Description" content="Legacy"></head></html>"#;
        assert_eq!(extract_page(html).meta_description, "Legacy");
    }

    #[test]
    fn test_meta_description_priority_order() {
        let html = r#"<html><head>
            <meta property="og:description" content="Social">
            <meta name="description" content="Primary">
        </head></html>"#;
        assert_eq!(extract_page(html).meta_description, "Primary");
    }

    #[test]
    fn test_missing_description_yields_sentinel() {
        let extract = extract_page("<html><head></head></html>");
        assert_eq!(extract.meta_description, NO_DESCRIPTION);
    }

    #[test]
    fn test_present_tag_with_empty_content_yields_sentinel() {
        // Fall-through is by tag presence: an empty name=description does
        // not hand over to og:description
        let html = r#"<html><head>
            <meta name="description" content="  ">
            <meta property="og:description" content="Social">
        </head></html>"#;
        assert_eq!(extract_page(html).meta_description, NO_DESCRIPTION);
    }

    #[test]
    fn test_canonical_with_multi_value_rel() {
        let html = r#"<html><head><link rel="canonical nofollow" href="/c"></head></html>"#;
        assert_eq!(extract_page(html).canonical.as_deref(), Some("/c"));
    }

    #[test]
    fn test_canonical() {
        let html =
            r#"<html><head><link rel="canonical" href=" https://example.com/c "></head></html>"#;
        assert_eq!(
            extract_page(html).canonical.as_deref(),
            Some("https://example.com/c")
        );
    }

    #[test]
    fn test_canonical_absent() {
        assert_eq!(extract_page("<html></html>").canonical, None);
    }

    #[test]
    fn test_links_per_occurrence_in_order() {
        let html = r#"<html><body>
            <a href="/a">one</a>
            <a href="/b">two</a>
            <a href="/a">one again</a>
        </body></html>"#;
        assert_eq!(extract_page(html).links, vec!["/a", "/b", "/a"]);
    }

    #[test]
    fn test_links_keep_raw_hrefs() {
        // The extractor does not resolve or filter; callers do
        let html = r##"<html><body>
            <a href="relative">r</a>
            <a href="#frag">f</a>
            <a href="mailto:x@example.com">m</a>
        </body></html>"##;
        assert_eq!(
            extract_page(html).links,
            vec!["relative", "#frag", "mailto:x@example.com"]
        );
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = r#"<html><body><a name="anchor">no href</a></body></html>"#;
        assert!(extract_page(html).links.is_empty());
    }

    #[test]
    fn test_malformed_html_is_absorbed() {
        let extract = extract_page("<html><head><title>Ok</title><body><a href='/x'");
        assert_eq!(extract.title, "Ok");
    }

    #[test]
    fn test_empty_extract() {
        let extract = PageExtract::empty();
        assert_eq!(extract.title, NO_TITLE);
        assert_eq!(extract.meta_description, NO_DESCRIPTION);
        assert!(extract.canonical.is_none());
        assert!(extract.links.is_empty());
    }
}
