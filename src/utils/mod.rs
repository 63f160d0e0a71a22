//! Utility functions and helpers.

use url::Url;

/// Resolve a potentially relative URL against a base URL.
///
/// Absolute URLs pass through unchanged; absolute paths (`/...`) are joined
/// onto the base origin. An unjoinable href is returned as-is.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://nszu.gov.ua").unwrap();
        assert_eq!(
            resolve_url(&base, "/document/123"),
            "https://nszu.gov.ua/document/123"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_resolve_url_keeps_query() {
        let base = Url::parse("https://nszu.gov.ua/arxiv-dokumentiv").unwrap();
        assert_eq!(
            resolve_url(&base, "/e-data/file?id=7"),
            "https://nszu.gov.ua/e-data/file?id=7"
        );
    }
}
