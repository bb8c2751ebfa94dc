// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use fitsense_connector::config::Config;
use fitsense_connector::services::{Connector, FitSenseClient, Registry, RetryPolicy};
use serde_json::Value;
use std::time::Duration;
use wiremock::MockServer;

/// Retry schedule with the default attempt count but millisecond backoff.
#[allow(dead_code)]
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(10),
    }
}

/// Create a client pointed at a mock server.
#[allow(dead_code)]
pub fn test_client(server: &MockServer) -> FitSenseClient {
    let config = Config {
        base_url: server.uri(),
        request_timeout: Duration::from_secs(5),
    };
    FitSenseClient::new(&config)
        .expect("Failed to build client")
        .with_retry(fast_retry())
}

/// Create a connector over the default streams pointed at a mock server.
#[allow(dead_code)]
pub fn test_connector(server: &MockServer) -> Connector {
    Connector::new(test_client(server), Registry::default())
}

/// Load a JSON fixture from tests/fixtures.
#[allow(dead_code)]
pub fn fixture(name: &str) -> Value {
    let path = format!("tests/fixtures/{}", name);
    let json = std::fs::read_to_string(&path).expect("Failed to read fixture");
    serde_json::from_str(&json).expect("Failed to parse fixture")
}
