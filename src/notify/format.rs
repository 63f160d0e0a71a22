//! Message rendering for Telegram delivery.
//!
//! Produces the HTML subset Telegram's parser accepts (bold, links).
//! Scraped text is escaped so a stray `<` in a title cannot break the
//! payload.

use unicode_segmentation::UnicodeSegmentation;

use crate::models::NewsItem;

const HEADER: &str = "🏥 <b>Нові документи НСЗУ</b>";
const RULE: &str = "━━━━━━━━━━━━━━━━━━━━";

/// Render new items into one Telegram HTML message.
///
/// Returns `None` for an empty item list. At most `limit` items are
/// rendered; the footer reports the total count of new items.
pub fn format_message(
    items: &[NewsItem],
    limit: usize,
    description_budget: usize,
) -> Option<String> {
    if items.is_empty() {
        return None;
    }

    let mut message = format!("{HEADER}\n{RULE}\n\n");

    for (i, item) in items.iter().take(limit).enumerate() {
        message.push_str(&format!("<b>{}. {}</b>\n", i + 1, escape_html(&item.title)));
        message.push_str(&format!("📅 {}\n", escape_html(&item.date)));

        if !item.description.is_empty() {
            let short = truncate_chars(&item.description, description_budget);
            message.push_str(&format!("📝 {}\n", escape_html(&short)));
        }

        if !item.url.is_empty() {
            message.push_str(&format!(
                "🔗 <a href=\"{}\">Читати повністю</a>\n",
                escape_html(&item.url)
            ));
        }

        message.push('\n');
    }

    message.push_str(&format!("{RULE}\nНових документів: {}", items.len()));

    Some(message)
}

/// Escape text for Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Truncate to `budget` grapheme clusters, appending `...` if cut.
///
/// Descriptions are Ukrainian text, so byte-based slicing would split
/// multi-byte characters.
fn truncate_chars(text: &str, budget: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= budget {
        return text.to_string();
    }
    let mut out: String = graphemes[..budget].concat();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DATE_UNKNOWN, NewsItem};

    fn item(n: usize) -> NewsItem {
        NewsItem {
            title: format!("Документ {n}"),
            url: format!("https://nszu.gov.ua/document/{n}"),
            date: "2026-08-20".to_string(),
            description: "Стислий опис змін".to_string(),
        }
    }

    #[test]
    fn empty_input_yields_none() {
        assert!(format_message(&[], 10, 150).is_none());
    }

    #[test]
    fn renders_numbered_blocks_and_total() {
        let items = vec![item(1), item(2), item(3)];
        let message = format_message(&items, 2, 150).unwrap();

        assert!(message.contains("<b>1. Документ 1</b>"));
        assert!(message.contains("<b>2. Документ 2</b>"));
        // Third item is beyond the limit but counted in the footer.
        assert!(!message.contains("Документ 3"));
        assert!(message.contains("Нових документів: 3"));
        assert!(message.contains("<a href=\"https://nszu.gov.ua/document/1\">"));
    }

    #[test]
    fn empty_description_and_url_lines_are_omitted() {
        let bare = NewsItem::bare("Лише заголовок", "");
        let message = format_message(&[bare], 10, 150).unwrap();
        assert!(!message.contains("📝"));
        assert!(!message.contains("🔗"));
        assert!(message.contains(DATE_UNKNOWN));
    }

    #[test]
    fn long_description_is_truncated_with_ellipsis() {
        let mut long = item(1);
        long.description = "ы".repeat(200);
        let message = format_message(&[long], 10, 150).unwrap();

        let rendered = format!("📝 {}...", "ы".repeat(150));
        assert!(message.contains(&rendered));
        assert!(!message.contains(&"ы".repeat(151)));
    }

    #[test]
    fn short_description_is_kept_whole() {
        let message = format_message(&[item(1)], 10, 150).unwrap();
        assert!(message.contains("📝 Стислий опис змін\n"));
    }

    #[test]
    fn scraped_markup_is_escaped() {
        let mut tricky = item(1);
        tricky.title = "Зміни <b>до</b> тарифів & правил".to_string();
        let message = format_message(&[tricky], 10, 150).unwrap();

        assert!(message.contains("Зміни &lt;b&gt;до&lt;/b&gt; тарифів &amp; правил"));
    }
}
