//! HTTP client for OpenAI-compatible APIs.
//!
//! Shared by the chat completion and embedding providers. Handles the API
//! key, base URL, timeout, and the optional retry loop.
//!
//! # Retry Strategy
//!
//! Retries are off unless `provider.max_retries` is set:
//! - HTTP 429 (rate limited) and 5xx (server error) → retry
//! - HTTP 4xx (client error, not 429) → fail immediately
//! - Network errors → retry
//! - Backoff: 1s, 2s, 4s, 8s, 16s, 32s (capped at 2^5)

use anyhow::{anyhow, bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ProviderConfig;

pub struct OpenAIClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    max_retries: u32,
}

impl OpenAIClient {
    /// Create a client, reading the API key from the environment variable
    /// named by `provider.api_key_env`.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or the HTTP client cannot
    /// be built.
    pub fn from_env(config: &ProviderConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| anyhow!("{} environment variable not set", config.api_key_env))?;
        Self::new(config, api_key)
    }

    pub fn new(config: &ProviderConfig, api_key: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            max_retries: config.max_retries,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` as JSON to `{base_url}/{path}` and decode the JSON reply.
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let url = format!("{}/{}", self.base_url, path);
        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                warn!(attempt, ?delay, url = %url, "retrying provider request");
                tokio::time::sleep(delay).await;
            }

            debug!(url = %url, attempt, "provider request");
            let resp = self
                .http
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(body)
                .send()
                .await;

            match resp {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return response
                            .json::<R>()
                            .await
                            .with_context(|| format!("Invalid response body from {}", url));
                    }

                    let body_text = response.text().await.unwrap_or_default();
                    if status.as_u16() == 429 || status.is_server_error() {
                        last_err = Some(anyhow!("Provider API error {}: {}", status, body_text));
                        continue;
                    }

                    bail!("Provider API error {}: {}", status, body_text);
                }
                Err(e) => {
                    last_err = Some(anyhow::Error::new(e).context(format!("Request to {} failed", url)));
                    continue;
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow!("Provider request failed after retries")))
    }
}
