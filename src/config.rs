// src/config.rs

//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::extract::ExtractionRules;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Page fetching settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Item extraction settings
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Telegram delivery settings
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Sent-item ledger settings
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Optional auxiliary output files
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.archive_url.trim().is_empty() {
            return Err(AppError::config("fetch.archive_url is empty"));
        }
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::config("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::config("fetch.timeout_secs must be > 0"));
        }
        if self.extract.max_items == 0 {
            return Err(AppError::config("extract.max_items must be > 0"));
        }
        if self.extract.rules.container_selectors.is_empty() {
            return Err(AppError::config("extract.rules.container_selectors is empty"));
        }
        if self.extract.rules.title_selectors.is_empty() {
            return Err(AppError::config("extract.rules.title_selectors is empty"));
        }
        if self.telegram.bot_token.trim().is_empty() {
            return Err(AppError::config("telegram.bot_token is empty"));
        }
        if self.telegram.chat_id.trim().is_empty() {
            return Err(AppError::config("telegram.chat_id is empty"));
        }
        if self.telegram.send_limit == 0 {
            return Err(AppError::config("telegram.send_limit must be > 0"));
        }
        if self.telegram.message_limit == 0 {
            return Err(AppError::config("telegram.message_limit must be > 0"));
        }
        if self.ledger.retention_days == 0 {
            return Err(AppError::config("ledger.retention_days must be > 0"));
        }
        Ok(())
    }
}

/// Page fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// URL of the document archive page
    #[serde(default = "defaults::archive_url")]
    pub archive_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Hint for browser-based fetchers; ignored by the plain HTTP fetcher
    #[serde(default = "defaults::headless")]
    pub headless: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            archive_url: defaults::archive_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            headless: defaults::headless(),
        }
    }
}

/// Item extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Maximum number of items to extract per run
    #[serde(default = "defaults::max_items")]
    pub max_items: usize,

    /// Selector heuristics
    #[serde(default)]
    pub rules: ExtractionRules,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_items: defaults::max_items(),
            rules: ExtractionRules::default(),
        }
    }
}

/// Telegram delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token
    #[serde(default)]
    pub bot_token: String,

    /// Target chat identifier
    #[serde(default)]
    pub chat_id: String,

    /// Maximum items rendered into one notification
    #[serde(default = "defaults::send_limit")]
    pub send_limit: usize,

    /// Transport payload limit in characters
    #[serde(default = "defaults::message_limit")]
    pub message_limit: usize,

    /// Description truncation budget in characters
    #[serde(default = "defaults::description_budget")]
    pub description_budget: usize,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            send_limit: defaults::send_limit(),
            message_limit: defaults::message_limit(),
            description_budget: defaults::description_budget(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Sent-item ledger settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Path to the ledger file
    #[serde(default = "defaults::ledger_path")]
    pub path: PathBuf,

    /// Records older than this many days are dropped by `prune`
    #[serde(default = "defaults::retention_days")]
    pub retention_days: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: defaults::ledger_path(),
            retention_days: defaults::retention_days(),
        }
    }
}

/// Optional non-authoritative JSON dumps, never read back.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Dump of every extracted item
    #[serde(default)]
    pub all_items_path: Option<PathBuf>,

    /// Dump of the new (not yet sent) items
    #[serde(default)]
    pub new_items_path: Option<PathBuf>,
}

mod defaults {
    use std::path::PathBuf;

    pub fn archive_url() -> String {
        "https://nszu.gov.ua/arxiv-dokumentiv?groups%5B2%5D%5Battributes%5D%5B%5D=36".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
            .into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn headless() -> bool {
        true
    }
    pub fn max_items() -> usize {
        20
    }
    pub fn send_limit() -> usize {
        10
    }
    pub fn message_limit() -> usize {
        4096
    }
    pub fn description_budget() -> usize {
        150
    }
    pub fn ledger_path() -> PathBuf {
        PathBuf::from("sent_news.json")
    }
    pub fn retention_days() -> u64 {
        30
    }
}
