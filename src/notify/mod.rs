// src/notify/mod.rs

//! Notification delivery to Telegram.
//!
//! The [`Notifier`] trait is the seam between the pipeline and the
//! transport; tests substitute an in-memory implementation.

mod chunk;
mod format;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::TelegramConfig;
use crate::error::{AppError, Result};

pub use chunk::split_chunks;
pub use format::{escape_html, format_message};

/// Notification transport: delivers one payload, already sized to fit.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
}

#[derive(Serialize)]
struct SendMessageBody<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

/// Telegram Bot API transport.
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_url: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Build a notifier from the Telegram configuration.
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: format!(
                "https://api.telegram.org/bot{}/sendMessage",
                config.bot_token
            ),
            chat_id: config.chat_id.clone(),
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        let body = SendMessageBody {
            chat_id: &self.chat_id,
            text,
            parse_mode: "HTML",
            disable_web_page_preview: true,
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::send(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::send(format!("Telegram API {status}: {detail}")));
        }

        // Telegram reports parse failures with HTTP 200 and ok=false.
        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::send(format!("bad response body: {e}")))?;
        if !json.get("ok").and_then(|v| v.as_bool()).unwrap_or(false) {
            let detail = json
                .get("description")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            return Err(AppError::send(format!("Telegram API error: {detail}")));
        }

        Ok(())
    }
}
