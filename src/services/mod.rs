// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - fetch, sync and output.

pub mod fitsense;
pub mod output;
pub mod sync;

pub use fitsense::{FitSenseClient, RetryPolicy};
pub use output::{JsonLinesSink, MemorySink, RecordSink};
pub use sync::{incremental_sync, Connector, Registry, RunSummary, StreamEntry, SyncFn};
