// src/pipeline/run.rs

//! Single linear watch run.
//!
//! `FETCH → EXTRACT → FILTER → FORMAT → SEND → MARK_SENT`, no branching
//! back. Items are marked sent only after every chunk was delivered, so a
//! failed delivery is retried on the next scheduled run (at-least-once).

use std::path::Path;
use std::time::Duration;

use chrono::Utc;

use crate::config::Config;
use crate::error::Result;
use crate::extract::Extractor;
use crate::fetch::PageFetcher;
use crate::ledger::Ledger;
use crate::models::NewsItem;
use crate::notify::{Notifier, format_message, split_chunks};

/// Summary of a watch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Items extracted from the page
    pub items_found: usize,
    /// Items not present in the ledger
    pub items_new: usize,
    /// Items rendered into the delivered payload and marked sent
    pub items_sent: usize,
    /// Payload chunks delivered
    pub chunks_sent: usize,
    /// Candidate elements the extractor skipped
    pub skipped_elements: usize,
    /// Ledger size before the run
    pub ledger_before: usize,
    /// Ledger size after the run
    pub ledger_after: usize,
}

/// Execute one full watch run.
///
/// A fetch or send failure aborts the run with the ledger untouched. A
/// ledger persist failure after a successful send is surfaced as an error
/// since delivery and record-keeping are then inconsistent.
pub async fn run_watch(
    fetcher: &dyn PageFetcher,
    notifier: &dyn Notifier,
    ledger: &mut Ledger,
    config: &Config,
) -> Result<RunReport> {
    let mut report = RunReport {
        ledger_before: ledger.len(),
        ledger_after: ledger.len(),
        ..RunReport::default()
    };

    log::info!("Fetching {}", config.fetch.archive_url);
    let markup = fetcher.render(&config.fetch.archive_url).await?;

    let extractor = Extractor::new(&config.extract.rules, &config.fetch.archive_url)?;
    let outcome = extractor.extract(&markup, config.extract.max_items);
    report.items_found = outcome.items.len();
    report.skipped_elements = outcome.skipped.len();

    match &outcome.matched_selector {
        Some(selector) => log::info!(
            "Extracted {} items via '{}' ({} skipped)",
            outcome.items.len(),
            selector,
            outcome.skipped.len()
        ),
        None => log::info!(
            "Extracted {} items via link scan ({} skipped)",
            outcome.items.len(),
            outcome.skipped.len()
        ),
    }
    for skip in &outcome.skipped {
        log::debug!("Skipped element #{}: {}", skip.index, skip.reason);
    }

    let new_items: Vec<NewsItem> = outcome
        .items
        .iter()
        .filter(|item| !ledger.contains(item))
        .cloned()
        .collect();
    report.items_new = new_items.len();
    log::info!("{} of {} items are new", new_items.len(), outcome.items.len());

    if new_items.is_empty() {
        log_summary(&report);
        return Ok(report);
    }

    // Non-authoritative dumps for inspection, never read back.
    if let Some(path) = &config.output.all_items_path {
        dump_items(path, &outcome.items).await;
    }
    if let Some(path) = &config.output.new_items_path {
        dump_items(path, &new_items).await;
    }

    let message = format_message(
        &new_items,
        config.telegram.send_limit,
        config.telegram.description_budget,
    )
    .expect("non-empty item list always formats");

    let chunks = split_chunks(&message, config.telegram.message_limit);
    log::info!("Sending {} chunk(s) to Telegram", chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        notifier.send(chunk).await?;
        report.chunks_sent = i + 1;
    }

    // Only items actually rendered into the payload are marked; the rest
    // come back as new on the next run.
    let sent_at = Utc::now();
    for item in new_items.iter().take(config.telegram.send_limit) {
        ledger.record(item, sent_at).await?;
        report.items_sent += 1;
    }

    report.ledger_after = ledger.len();
    log_summary(&report);
    Ok(report)
}

fn log_summary(report: &RunReport) {
    log::info!(
        "Run summary: found={} new={} sent={} chunks={} skipped={} ledger {} -> {}",
        report.items_found,
        report.items_new,
        report.items_sent,
        report.chunks_sent,
        report.skipped_elements,
        report.ledger_before,
        report.ledger_after
    );
}

async fn dump_items(path: &Path, items: &[NewsItem]) {
    let write = async {
        let bytes = serde_json::to_vec_pretty(items)?;
        tokio::fs::write(path, bytes).await?;
        crate::error::Result::Ok(())
    };
    if let Err(e) = write.await {
        log::warn!("Failed to dump items to {:?}: {}", path, e);
    }
}
