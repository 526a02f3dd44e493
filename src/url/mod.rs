//! URL handling module for Treeline
//!
//! This module provides reference resolution against a base URL, origin
//! comparison for scope checks, and path-segment splitting for the
//! hierarchy accumulator.

mod normalize;

pub use normalize::resolve_reference;

use url::Url;

/// Checks whether two URLs belong to the same origin
///
/// Origin is scheme + host + port, which is exactly the boundary the scope
/// filter enforces. Comparison is delegated to [`Url::origin`].
///
/// # Examples
///
/// ```
/// use treeline::url::same_origin;
/// use url::Url;
///
/// let a = Url::parse("https://example.com/personas").unwrap();
/// let b = Url::parse("https://example.com/other?q=1").unwrap();
/// let c = Url::parse("https://other.com/personas").unwrap();
/// assert!(same_origin(&a, &b));
/// assert!(!same_origin(&a, &c));
/// ```
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}

/// Splits a URL's path into its non-empty segments
///
/// `https://example.com/a//b/` yields `["a", "b"]`. The root path yields an
/// empty vector.
pub fn path_segments(url: &Url) -> Vec<String> {
    url.path()
        .split('/')
        .filter(|seg| !seg.is_empty())
        .map(|seg| seg.to_string())
        .collect()
}
