// src/fetch.rs

//! Page fetching seam.
//!
//! The pipeline only needs fully-rendered markup for one URL; how it is
//! produced (plain HTTP here, a headless browser elsewhere) stays behind
//! the [`PageFetcher`] trait.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::FetchConfig;
use crate::error::{AppError, Result};

/// Renders a URL into its page markup.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn render(&self, url: &str) -> Result<String>;
}

/// Plain HTTP fetcher.
///
/// Sufficient for the archive page's server-rendered listing; the
/// `fetch.headless` config flag only matters for browser-based
/// implementations.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher from the fetch configuration.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn render(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::fetch(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(url, format!("HTTP status {status}")));
        }

        response.text().await.map_err(|e| AppError::fetch(url, e))
    }
}
