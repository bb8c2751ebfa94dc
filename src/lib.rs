// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FitSense connector: incremental sync of fitness data
//!
//! This crate polls the FitSense HTTP API for activities, sleep sessions and
//! heart-rate samples, emits each row as a record for a downstream ingestion
//! pipeline, and keeps a per-stream `updated_at` bookmark so later polls only
//! fetch new or updated rows.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

pub use config::Config;
pub use error::{ConnectorError, FetchError};
pub use models::{Record, StreamDescriptor, SyncState};
pub use services::{Connector, FitSenseClient, RetryPolicy};
