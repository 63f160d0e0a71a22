// src/ledger.rs

//! Persistent fingerprint ledger of delivered items.
//!
//! The ledger is the sole source of truth for "already sent" state. It is a
//! single UTF-8 JSON file mapping fingerprint to delivery record, loaded
//! fully into memory at run start and rewritten whole after every mutation.
//! Records are only ever inserted or removed, never updated in place.
//!
//! Concurrent runs against the same backing file are not supported; the
//! load-modify-persist cycle has no cross-process locking.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::NewsItem;

/// Delivery record for one fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerRecord {
    /// Item title at delivery time
    pub title: String,

    /// Item URL at delivery time
    pub url: String,

    /// Free-form item date
    pub date: String,

    /// When the item was delivered
    pub sent_at: DateTime<Utc>,
}

/// Ledger statistics for reporting.
#[derive(Debug, Clone, Default)]
pub struct LedgerStats {
    pub total_records: usize,
    pub file_size_bytes: u64,
}

/// Persistent map from content fingerprint to delivery record.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    records: HashMap<String, LedgerRecord>,
}

impl Ledger {
    /// Load the ledger from its backing file.
    ///
    /// Fails soft: a missing, unreadable, or unparsable file yields an empty
    /// ledger with a warning. Previously-sent items may be re-delivered in
    /// that case, which is the accepted trade-off.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(records) => records,
                Err(e) => {
                    log::warn!(
                        "Ledger file {:?} is not valid JSON: {}. Starting empty.",
                        path,
                        e
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                log::warn!("Failed to read ledger {:?}: {}. Starting empty.", path, e);
                HashMap::new()
            }
        };

        Self { path, records }
    }

    /// Create an empty ledger backed by the given path, without touching disk.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: HashMap::new(),
        }
    }

    /// Whether the item has already been delivered.
    pub fn contains(&self, item: &NewsItem) -> bool {
        self.records.contains_key(&item.fingerprint())
    }

    /// Number of records in the ledger.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record an item as delivered and persist the whole ledger.
    ///
    /// Overwrites any existing record for the same fingerprint. A persist
    /// failure is a hard error: the item was delivered but not recorded.
    pub async fn record(&mut self, item: &NewsItem, sent_at: DateTime<Utc>) -> Result<()> {
        self.records.insert(
            item.fingerprint(),
            LedgerRecord {
                title: item.title.clone(),
                url: item.url.clone(),
                date: item.date.clone(),
                sent_at,
            },
        );
        self.persist().await
    }

    /// Drop records delivered before `now - older_than`.
    ///
    /// Persists only if anything was removed. Returns the removal count.
    pub async fn prune(&mut self, older_than: Duration) -> Result<usize> {
        let cutoff = Utc::now() - older_than;
        let before = self.records.len();
        self.records.retain(|_, record| record.sent_at >= cutoff);

        let removed = before - self.records.len();
        if removed > 0 {
            self.persist().await?;
        }
        Ok(removed)
    }

    /// Record count and backing file size.
    pub async fn stats(&self) -> LedgerStats {
        let file_size_bytes = tokio::fs::metadata(&self.path)
            .await
            .map(|m| m.len())
            .unwrap_or(0);

        LedgerStats {
            total_records: self.records.len(),
            file_size_bytes,
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole ledger atomically (temp file, then rename).
    ///
    /// serde_json keeps non-ASCII characters unescaped, so Ukrainian titles
    /// stay human-diffable in the file.
    async fn persist(&self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp)
            .await
            .map_err(|e| AppError::ledger(format!("create {:?}: {}", tmp, e)))?;
        file.write_all(&bytes)
            .await
            .map_err(|e| AppError::ledger(format!("write {:?}: {}", tmp, e)))?;
        file.flush()
            .await
            .map_err(|e| AppError::ledger(format!("flush {:?}: {}", tmp, e)))?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| AppError::ledger(format!("rename to {:?}: {}", self.path, e)))?;
        Ok(())
    }
}
