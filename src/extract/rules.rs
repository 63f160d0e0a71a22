//! Extraction heuristics as data.
//!
//! The archive page has no stable markup contract, so field extraction is
//! driven by ordered selector lists that can be tuned from the config file
//! without touching code.

use serde::{Deserialize, Serialize};

/// Ordered selector lists driving item extraction.
///
/// Each list is tried in priority order; the first selector that matches
/// wins. Defaults mirror the structures observed on nszu.gov.ua.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRules {
    /// Container selectors, most specific first
    #[serde(default = "defaults::container_selectors")]
    pub container_selectors: Vec<String>,

    /// Title selectors tried within a container
    #[serde(default = "defaults::title_selectors")]
    pub title_selectors: Vec<String>,

    /// Date selectors tried within a container
    #[serde(default = "defaults::date_selectors")]
    pub date_selectors: Vec<String>,

    /// Description selectors tried within a container
    #[serde(default = "defaults::description_selectors")]
    pub description_selectors: Vec<String>,

    /// Href path substrings accepted by the link-scan fallback
    #[serde(default = "defaults::link_path_markers")]
    pub link_path_markers: Vec<String>,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            container_selectors: defaults::container_selectors(),
            title_selectors: defaults::title_selectors(),
            date_selectors: defaults::date_selectors(),
            description_selectors: defaults::description_selectors(),
            link_path_markers: defaults::link_path_markers(),
        }
    }
}

mod defaults {
    pub fn container_selectors() -> Vec<String> {
        vec![
            "article".into(),
            "div.news-item".into(),
            "div.document-item".into(),
            "div.item".into(),
            "li.news".into(),
            "div[class*=\"news\"]".into(),
            "div[class*=\"document\"]".into(),
        ]
    }

    pub fn title_selectors() -> Vec<String> {
        vec![
            "h1".into(),
            "h2".into(),
            "h3".into(),
            "h4".into(),
            "a".into(),
        ]
    }

    pub fn date_selectors() -> Vec<String> {
        vec![
            "time".into(),
            ".date".into(),
            ".published".into(),
            ".post-date".into(),
            "span[class*=\"date\" i]".into(),
        ]
    }

    pub fn description_selectors() -> Vec<String> {
        vec![
            "p".into(),
            ".description".into(),
            ".excerpt".into(),
            ".summary".into(),
        ]
    }

    pub fn link_path_markers() -> Vec<String> {
        vec!["/e-data/".into(), "/document/".into(), "/news/".into()]
    }
}
