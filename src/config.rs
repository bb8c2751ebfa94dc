// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Connector configuration loaded from environment variables and the sample file.
//!
//! Each setting resolves in order: environment variable, then the matching key
//! in the sample config, then a hard-coded default. The sample config is
//! `config.sample.json`, compiled into the binary; `FITSENSE_CONFIG_PATH`
//! points at a file to use instead. A missing or malformed file is ignored.

use serde_json::Value;
use std::env;
use std::path::Path;
use std::time::Duration;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5055";
/// Default per-request socket timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SEC: u64 = 15;
/// Sample config bundled with the connector.
pub const BUNDLED_SAMPLE_CONFIG: &str = include_str!("../config.sample.json");

/// Connector configuration, constructed once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// FitSense API base URL, without a trailing slash
    pub base_url: String,
    /// Per-request socket timeout
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SEC),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Uses the bundled sample config unless `FITSENSE_CONFIG_PATH` is set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        let lookup = |key: &str| env::var(key).ok();
        match env::var("FITSENSE_CONFIG_PATH") {
            Ok(path) => Self::resolve(lookup, Path::new(&path)),
            Err(_) => Self::resolve_bundled(lookup),
        }
    }

    /// Resolve configuration from an env lookup and the bundled sample config.
    pub fn resolve_bundled<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve_with(lookup, parse_sample(BUNDLED_SAMPLE_CONFIG, "bundled"))
    }

    /// Resolve configuration from an env lookup and a sample file path.
    pub fn resolve<F>(lookup: F, sample_path: &Path) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve_with(lookup, load_sample_file(sample_path))
    }

    fn resolve_with<F>(lookup: F, file: serde_json::Map<String, Value>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("BASE_URL")
            .or_else(|| file_string(&file, "BASE_URL"))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = lookup("REQUEST_TIMEOUT_SEC")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .or_else(|| file_u64(&file, "REQUEST_TIMEOUT_SEC"))
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SEC);

        let config = Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(timeout_secs),
        };

        tracing::debug!(
            base_url = %config.base_url,
            timeout_secs,
            "Configuration resolved"
        );
        config
    }
}

/// Read the sample file as a JSON object. Any failure yields an empty map.
fn load_sample_file(path: &Path) -> serde_json::Map<String, Value> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "No sample config file");
            return serde_json::Map::new();
        }
    };

    parse_sample(&contents, &path.display().to_string())
}

/// Parse sample config contents as a JSON object. Any failure yields an empty map.
fn parse_sample(contents: &str, source: &str) -> serde_json::Map<String, Value> {
    match serde_json::from_str::<Value>(contents) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            tracing::debug!(source, "Sample config is not an object, ignoring");
            serde_json::Map::new()
        }
        Err(e) => {
            tracing::debug!(source, error = %e, "Malformed sample config, ignoring");
            serde_json::Map::new()
        }
    }
}

fn file_string(file: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    file.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Timeout may be written as a number or a numeric string.
fn file_u64(file: &serde_json::Map<String, Value>, key: &str) -> Option<u64> {
    match file.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
