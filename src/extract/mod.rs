// src/extract/mod.rs

//! Best-effort item extraction from archive page markup.
//!
//! The page structure is not guaranteed, so extraction walks an ordered list
//! of container selectors and uses the first one that matches anything. When
//! no structural selector matches at all, a link-scan fallback collects
//! anchors that look like document links. Problems with a single container
//! skip only that container and are reported as typed skips.

pub mod rules;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{DATE_UNKNOWN, NewsItem};
use crate::utils::resolve_url;

pub use rules::ExtractionRules;

/// Why a candidate element produced no item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Container had no title text under any title selector
    MissingTitle,
    /// Fallback anchor had an empty trimmed text
    EmptyAnchorText,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingTitle => write!(f, "no title text"),
            SkipReason::EmptyAnchorText => write!(f, "empty anchor text"),
        }
    }
}

/// A candidate element that was skipped, with its document-order index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    pub index: usize,
    pub reason: SkipReason,
}

/// Result of one extraction pass.
#[derive(Debug, Default)]
pub struct ExtractOutcome {
    /// Extracted items in document order
    pub items: Vec<NewsItem>,
    /// Candidate elements that produced no item
    pub skipped: Vec<Skip>,
    /// Container selector that matched, `None` if the link fallback ran
    pub matched_selector: Option<String>,
}

/// Extractor with pre-parsed selectors.
pub struct Extractor {
    containers: Vec<(String, Selector)>,
    titles: Vec<Selector>,
    dates: Vec<Selector>,
    descriptions: Vec<Selector>,
    anchor: Selector,
    link_markers: Vec<String>,
    base: Url,
}

impl Extractor {
    /// Build an extractor for the given rules and site base URL.
    ///
    /// All selectors are parsed up front; a malformed selector is a
    /// configuration-time error, not a per-run one.
    pub fn new(rules: &ExtractionRules, base_url: &str) -> Result<Self> {
        Ok(Self {
            containers: rules
                .container_selectors
                .iter()
                .map(|s| Ok((s.clone(), parse_selector(s)?)))
                .collect::<Result<Vec<_>>>()?,
            titles: parse_all(&rules.title_selectors)?,
            dates: parse_all(&rules.date_selectors)?,
            descriptions: parse_all(&rules.description_selectors)?,
            anchor: parse_selector("a[href]")?,
            link_markers: rules.link_path_markers.clone(),
            base: Url::parse(base_url)?,
        })
    }

    /// Extract up to `max_items` items from the markup.
    ///
    /// Deterministic for identical markup. Pure: no network or file I/O.
    pub fn extract(&self, markup: &str, max_items: usize) -> ExtractOutcome {
        let document = Html::parse_document(markup);

        for (name, selector) in &self.containers {
            let containers: Vec<ElementRef<'_>> =
                document.select(selector).take(max_items).collect();
            if containers.is_empty() {
                continue;
            }

            log::debug!("Container selector matched: {}", name);
            let mut outcome = ExtractOutcome {
                matched_selector: Some(name.clone()),
                ..ExtractOutcome::default()
            };

            for (index, container) in containers.into_iter().enumerate() {
                match self.parse_container(&container) {
                    Ok(item) => outcome.items.push(item),
                    Err(reason) => outcome.skipped.push(Skip { index, reason }),
                }
            }
            return outcome;
        }

        log::debug!("No container selector matched, scanning links");
        self.scan_links(&document, max_items)
    }

    /// Parse one structured container into an item.
    fn parse_container(
        &self,
        container: &ElementRef<'_>,
    ) -> std::result::Result<NewsItem, SkipReason> {
        let title_elem = self
            .titles
            .iter()
            .find_map(|sel| container.select(sel).next())
            .ok_or(SkipReason::MissingTitle)?;

        let title = element_text(&title_elem);
        if title.is_empty() {
            return Err(SkipReason::MissingTitle);
        }

        // The title element itself if it is an anchor, else the first
        // anchor nested inside it.
        let link_elem = if title_elem.value().name() == "a" {
            Some(title_elem)
        } else {
            title_elem.select(&self.anchor).next()
        };
        let url = link_elem
            .and_then(|e| e.value().attr("href"))
            .map(|href| resolve_url(&self.base, href))
            .unwrap_or_default();

        let date = self
            .dates
            .iter()
            .find_map(|sel| container.select(sel).next())
            .map(|e| element_text(&e))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DATE_UNKNOWN.to_string());

        let description = self
            .descriptions
            .iter()
            .find_map(|sel| container.select(sel).next())
            .map(|e| element_text(&e))
            .unwrap_or_default();

        Ok(NewsItem {
            title,
            url,
            date,
            description,
        })
    }

    /// Fallback: collect anchors whose href path contains a known marker.
    fn scan_links(&self, document: &Html, max_items: usize) -> ExtractOutcome {
        let mut outcome = ExtractOutcome::default();

        for (index, anchor) in document.select(&self.anchor).enumerate() {
            if outcome.items.len() >= max_items {
                break;
            }

            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if !self.link_markers.iter().any(|m| href.contains(m.as_str())) {
                continue;
            }

            let title = element_text(&anchor);
            if title.is_empty() {
                outcome.skipped.push(Skip {
                    index,
                    reason: SkipReason::EmptyAnchorText,
                });
                continue;
            }

            outcome
                .items
                .push(NewsItem::bare(title, resolve_url(&self.base, href)));
        }

        outcome
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

fn parse_all(selectors: &[String]) -> Result<Vec<Selector>> {
    selectors.iter().map(|s| parse_selector(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://nszu.gov.ua";

    fn extractor() -> Extractor {
        Extractor::new(&ExtractionRules::default(), BASE).unwrap()
    }

    #[test]
    fn rejects_malformed_selector() {
        let mut rules = ExtractionRules::default();
        rules.container_selectors.push("[[broken".to_string());
        assert!(matches!(
            Extractor::new(&rules, BASE),
            Err(AppError::Selector { .. })
        ));
    }

    #[test]
    fn first_matching_container_selector_wins() {
        let html = r#"
            <article><h2>From article</h2></article>
            <div class="news-item"><h2>From div</h2></div>
        "#;
        let outcome = extractor().extract(html, 10);
        assert_eq!(outcome.matched_selector.as_deref(), Some("article"));
        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.items[0].title, "From article");
    }

    #[test]
    fn extracts_all_fields_from_structured_container() {
        let html = r#"
            <article>
                <h3>  Наказ про тарифи  </h3>
                <a href="/document/42">читати</a>
                <time>2026-08-20</time>
                <p>Опис документа</p>
            </article>
        "#;
        let outcome = extractor().extract(html, 10);
        assert_eq!(outcome.items.len(), 1);

        let item = &outcome.items[0];
        assert_eq!(item.title, "Наказ про тарифи");
        // h3 holds no anchor, so no URL is attached.
        assert_eq!(item.url, "");
        assert_eq!(item.date, "2026-08-20");
        assert_eq!(item.description, "Опис документа");
    }

    #[test]
    fn heading_priority_beats_document_order() {
        let html = r#"
            <article>
                <h4>lower heading first</h4>
                <h2>the real title</h2>
            </article>
        "#;
        let outcome = extractor().extract(html, 10);
        assert_eq!(outcome.items[0].title, "the real title");
    }

    #[test]
    fn title_anchor_provides_resolved_link() {
        let html = r#"<article><h2><a href="/document/7">Заголовок</a></h2></article>"#;
        let outcome = extractor().extract(html, 10);
        // h2 wins as the title element; the anchor inside it carries the link.
        assert_eq!(outcome.items[0].title, "Заголовок");
        assert_eq!(outcome.items[0].url, "https://nszu.gov.ua/document/7");
    }

    #[test]
    fn anchor_title_element_is_its_own_link() {
        let html = r#"<div class="item"><a href="https://other.site/page">External</a></div>"#;
        let outcome = extractor().extract(html, 10);
        assert_eq!(outcome.items[0].url, "https://other.site/page");
    }

    #[test]
    fn missing_date_and_description_use_sentinels() {
        let html = r#"<article><h2>Only a title</h2></article>"#;
        let outcome = extractor().extract(html, 10);
        assert_eq!(outcome.items[0].date, DATE_UNKNOWN);
        assert_eq!(outcome.items[0].description, "");
    }

    #[test]
    fn date_class_match_is_case_insensitive() {
        let html = r#"
            <article>
                <h2>Title</h2>
                <span class="PostDate">21.08.2026</span>
            </article>
        "#;
        let outcome = extractor().extract(html, 10);
        assert_eq!(outcome.items[0].date, "21.08.2026");
    }

    #[test]
    fn container_without_title_is_skipped_not_fatal() {
        let html = r#"
            <article><h2>First</h2></article>
            <article><span class="date">2026-08-01</span></article>
            <article><h2>Third</h2></article>
        "#;
        let outcome = extractor().extract(html, 10);
        assert_eq!(outcome.items.len(), 2);
        assert_eq!(outcome.items[0].title, "First");
        assert_eq!(outcome.items[1].title, "Third");
        assert_eq!(
            outcome.skipped,
            vec![Skip {
                index: 1,
                reason: SkipReason::MissingTitle
            }]
        );
    }

    #[test]
    fn max_items_caps_containers() {
        let html = r#"
            <article><h2>1</h2></article>
            <article><h2>2</h2></article>
            <article><h2>3</h2></article>
        "#;
        let outcome = extractor().extract(html, 2);
        assert_eq!(outcome.items.len(), 2);
    }

    #[test]
    fn fallback_scans_marker_links() {
        let html = r#"
            <nav>
                <a href="/about">About</a>
                <a href="/document/123">Наказ №123</a>
                <a href="/news/9">Новина</a>
                <a href="https://nszu.gov.ua/e-data/file.xlsx">Дані</a>
            </nav>
        "#;
        let outcome = extractor().extract(html, 10);
        assert!(outcome.matched_selector.is_none());
        assert_eq!(outcome.items.len(), 3);
        assert_eq!(outcome.items[0].title, "Наказ №123");
        assert_eq!(outcome.items[0].url, "https://nszu.gov.ua/document/123");
        assert_eq!(outcome.items[0].date, DATE_UNKNOWN);
        assert_eq!(outcome.items[0].description, "");
        assert_eq!(outcome.items[2].url, "https://nszu.gov.ua/e-data/file.xlsx");
    }

    #[test]
    fn fallback_skips_empty_anchor_text() {
        let html = r#"
            <a href="/document/1"><img src="x.png"></a>
            <a href="/document/2">Readable</a>
        "#;
        let outcome = extractor().extract(html, 10);
        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.items[0].title, "Readable");
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].reason, SkipReason::EmptyAnchorText);
    }

    #[test]
    fn fallback_respects_max_items() {
        let html = r#"
            <a href="/news/1">1</a>
            <a href="/news/2">2</a>
            <a href="/news/3">3</a>
        "#;
        let outcome = extractor().extract(html, 2);
        assert_eq!(outcome.items.len(), 2);
    }

    #[test]
    fn extraction_is_deterministic() {
        let html = r#"
            <div class="document-item"><h2>A</h2><time>2026-01-01</time></div>
            <div class="document-item"><h2>B</h2></div>
        "#;
        let ex = extractor();
        let first = ex.extract(html, 10);
        let second = ex.extract(html, 10);
        assert_eq!(first.items, second.items);
        assert_eq!(first.matched_selector, second.matched_selector);
    }
}
