// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Connector error types.

use reqwest::StatusCode;

/// A single failed fetch attempt against the FitSense API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Decode(String),
}

/// Error type for a sync run.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("FitSense API error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Unknown stream: {0}")]
    UnknownStream(String),

    #[error("State error: {0}")]
    State(String),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ConnectorError {
    /// HTTP status of the final failed attempt, if the API answered at all.
    pub fn http_status(&self) -> Option<StatusCode> {
        match self {
            ConnectorError::Fetch(FetchError::Http { status, .. }) => Some(*status),
            ConnectorError::Fetch(FetchError::Request(e)) => e.status(),
            _ => None,
        }
    }
}

/// Result type alias for connector operations
pub type Result<T> = std::result::Result<T, ConnectorError>;
