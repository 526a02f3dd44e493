use crate::UrlError;
use url::Url;

/// Resolves a link reference against a base URL
///
/// # Resolution Steps
///
/// 1. Trim surrounding whitespace from the reference
/// 2. Resolve relative or absolute references per standard URL rules
/// 3. Strip any fragment
///
/// The result is always an absolute URL. Callers must treat an error as
/// "drop this link"; a malformed href on a page is never fatal to a crawl.
///
/// # Arguments
///
/// * `base` - The absolute URL the reference was found on
/// * `href` - The reference to resolve (relative or absolute, may carry a
///   fragment or query)
///
/// # Examples
///
/// ```
/// use treeline::url::resolve_reference;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/personas/").unwrap();
/// let resolved = resolve_reference(&base, "cuentas#top").unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/personas/cuentas");
/// ```
pub fn resolve_reference(base: &Url, href: &str) -> Result<Url, UrlError> {
    let href = href.trim();

    let mut resolved = base
        .join(href)
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;

    resolved.set_fragment(None);

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/personas/cuentas").unwrap()
    }

    #[test]
    fn test_resolve_absolute() {
        let result = resolve_reference(&base(), "https://example.com/otra").unwrap();
        assert_eq!(result.as_str(), "https://example.com/otra");
    }

    #[test]
    fn test_resolve_root_relative() {
        let result = resolve_reference(&base(), "/tarjetas").unwrap();
        assert_eq!(result.as_str(), "https://example.com/tarjetas");
    }

    #[test]
    fn test_resolve_relative() {
        let result = resolve_reference(&base(), "ahorro").unwrap();
        assert_eq!(result.as_str(), "https://example.com/personas/ahorro");
    }

    #[test]
    fn test_strips_fragment() {
        let result = resolve_reference(&base(), "/page#section").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_fragment_only_resolves_to_base() {
        let result = resolve_reference(&base(), "#top").unwrap();
        assert_eq!(result.as_str(), "https://example.com/personas/cuentas");
    }

    #[test]
    fn test_keeps_query() {
        let result = resolve_reference(&base(), "/page?b=2&a=1").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page?b=2&a=1");
    }

    #[test]
    fn test_trims_whitespace() {
        let result = resolve_reference(&base(), "  /page  ").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_cross_origin_reference_resolves() {
        // Scope filtering is the caller's job, not the normalizer's
        let result = resolve_reference(&base(), "https://other.com/x").unwrap();
        assert_eq!(result.as_str(), "https://other.com/x");
    }

    #[test]
    fn test_malformed_reference() {
        let result = resolve_reference(&base(), "https://[bad");
        assert!(matches!(result, Err(UrlError::Parse(_))));
    }
}
