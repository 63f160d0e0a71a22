//! News item data structure.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Sentinel date for items where no date element could be located.
pub const DATE_UNKNOWN: &str = "unknown";

/// A published item extracted from the archive page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsItem {
    /// Item title
    pub title: String,

    /// Absolute URL to the item (empty string if no link was found)
    pub url: String,

    /// Free-form date text, [`DATE_UNKNOWN`] if absent
    pub date: String,

    /// Short description, empty string if absent
    pub description: String,
}

impl NewsItem {
    /// Create an item with an unknown date and no description.
    pub fn bare(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            date: DATE_UNKNOWN.to_string(),
            description: String::new(),
        }
    }

    /// Deduplication identity: lowercase hex of the first 128 bits of
    /// SHA-256 over `title || url`.
    ///
    /// Stable across runs and platforms. Two items with the same title and
    /// URL are the same item regardless of date or description.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.title.as_bytes());
        hasher.update(self.url.as_bytes());
        let digest = hasher.finalize();
        hex::encode(&digest[..16])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> NewsItem {
        NewsItem {
            title: "Оновлено перелік документів".to_string(),
            url: "https://nszu.gov.ua/document/123".to_string(),
            date: "2026-08-01".to_string(),
            description: "Короткий опис".to_string(),
        }
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let item = sample_item();
        assert_eq!(item.fingerprint(), item.fingerprint());
        assert_eq!(item.fingerprint().len(), 32);
    }

    #[test]
    fn fingerprint_ignores_date_and_description() {
        let a = sample_item();
        let mut b = sample_item();
        b.date = DATE_UNKNOWN.to_string();
        b.description = String::new();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_depends_on_title_and_url() {
        let a = sample_item();
        let mut b = sample_item();
        b.title.push('!');
        assert_ne!(a.fingerprint(), b.fingerprint());

        let mut c = sample_item();
        c.url.push('0');
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
