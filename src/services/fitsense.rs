// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FitSense API client.
//!
//! Handles:
//! - One GET per stream per sync cycle, with an optional `since` cursor
//! - Linear-backoff retry of any failed attempt (network, status, decode)

use crate::config::{Config, ConfigError};
use crate::error::FetchError;
use serde_json::Value;
use std::time::Duration;

/// Retry schedule for fetches. Delay before retry `n` is `base_delay * n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Backoff after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// FitSense API client.
#[derive(Clone)]
pub struct FitSenseClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl FitSenseClient {
    /// Create a client with the configured base URL and socket timeout.
    ///
    /// The timeout bounds connecting and each read, not the whole request,
    /// so a large body that keeps arriving is never cut off.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.request_timeout)
            .read_timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::default(),
        })
    }

    /// Replace the retry schedule.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all rows of an endpoint updated since the given cursor.
    ///
    /// Failed attempts are retried per the retry policy; once attempts are
    /// exhausted the last error is returned as-is.
    pub async fn fetch(
        &self,
        endpoint: &str,
        since: Option<&str>,
    ) -> Result<Vec<Value>, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let since = since.filter(|s| !s.is_empty());
        let max_attempts = self.retry.max_attempts.max(1);

        let mut attempt = 1;
        loop {
            match self.fetch_once(&url, since).await {
                Ok(rows) => {
                    tracing::debug!(endpoint, attempt, rows = rows.len(), "Fetched rows");
                    return Ok(rows);
                }
                Err(e) if attempt < max_attempts => {
                    let backoff = self.retry.delay_after(attempt);
                    tracing::warn!(
                        endpoint,
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "Fetch failed, retrying after backoff"
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(
                        endpoint,
                        attempts = attempt,
                        error = %e,
                        "Fetch failed, giving up"
                    );
                    return Err(e);
                }
            }
        }
    }

    /// Single GET attempt. Any partially read body is dropped on error.
    async fn fetch_once(&self, url: &str, since: Option<&str>) -> Result<Vec<Value>, FetchError> {
        let mut request = self.http.get(url);
        if let Some(since) = since {
            request = request.query(&[("since", since)]);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Http { status, body });
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<Vec<Value>>(&body)
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
