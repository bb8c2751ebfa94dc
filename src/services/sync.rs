// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Incremental sync driver.
//!
//! Handles the core workflow per stream:
//! 1. Read the stream's bookmark from state
//! 2. Fetch rows updated since the bookmark
//! 3. Pass every row through as a record, in the order received
//! 4. Advance the bookmark to the greatest cursor value seen

use crate::config::{Config, ConfigError};
use crate::error::{ConnectorError, Result};
use crate::models::{Catalog, Message, Record, StreamDescriptor, SyncState};
use crate::services::output::RecordSink;
use crate::services::FitSenseClient;
use crate::time_utils::now_rfc3339;
use serde_json::Value;

pub const CONNECTOR_NAME: &str = "fitsense_connector";
pub const CONNECTOR_VERSION: &str = "0.1.0";

/// Turns fetched rows into records and updates the stream's bookmark.
pub type SyncFn = fn(&StreamDescriptor, Vec<Value>, &mut SyncState) -> Vec<Record>;

/// A stream descriptor paired with its sync function.
#[derive(Clone)]
pub struct StreamEntry {
    pub descriptor: StreamDescriptor,
    pub sync: SyncFn,
}

/// Ordered list of synced streams.
#[derive(Clone)]
pub struct Registry {
    entries: Vec<StreamEntry>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(vec![
            StreamEntry {
                descriptor: StreamDescriptor::activities(),
                sync: incremental_sync,
            },
            StreamEntry {
                descriptor: StreamDescriptor::sleep(),
                sync: incremental_sync,
            },
            StreamEntry {
                descriptor: StreamDescriptor::hr_series(),
                sync: incremental_sync,
            },
        ])
    }
}

impl Registry {
    pub fn new(entries: Vec<StreamEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[StreamEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&StreamEntry> {
        self.entries.iter().find(|e| e.descriptor.name == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.descriptor.name).collect()
    }
}

/// Pass rows through unchanged while tracking the running maximum cursor.
///
/// Cursors compare as plain strings. Rows without a cursor value are still
/// emitted. The bookmark is only written when some cursor is known, so an
/// empty fetch leaves state untouched.
pub fn incremental_sync(
    stream: &StreamDescriptor,
    rows: Vec<Value>,
    state: &mut SyncState,
) -> Vec<Record> {
    let mut latest = state.get(stream.name).map(str::to_string);
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        if let Some(cursor) = stream.cursor_of(&row) {
            let newer = match latest.as_deref() {
                Some(current) => cursor > current,
                None => true,
            };
            if newer {
                latest = Some(cursor.to_string());
            }
        }
        records.push(Record::new(stream.name, row));
    }

    if let Some(latest) = latest {
        state.set(stream.name, latest);
    }
    records
}

/// Per-stream outcome of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSummary {
    pub stream: &'static str,
    pub records: usize,
    pub bookmark: Option<String>,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub streams: Vec<StreamSummary>,
}

impl RunSummary {
    pub fn total_records(&self) -> usize {
        self.streams.iter().map(|s| s.records).sum()
    }
}

/// Composes the API client with the stream registry.
#[derive(Clone)]
pub struct Connector {
    client: FitSenseClient,
    registry: Registry,
}

impl Connector {
    pub fn new(client: FitSenseClient, registry: Registry) -> Self {
        Self { client, registry }
    }

    /// Connector over the default streams.
    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(FitSenseClient::new(config)?, Registry::default()))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Static catalog of streams, in registry order.
    pub fn discover(&self) -> Catalog {
        Catalog {
            name: CONNECTOR_NAME,
            version: CONNECTOR_VERSION,
            streams: self
                .registry
                .entries()
                .iter()
                .map(|e| e.descriptor.clone())
                .collect(),
        }
    }

    /// Sync one stream against a prior state.
    ///
    /// Returns the records in upstream order and the updated state; the
    /// input state is not modified. A fetch failure aborts the cycle.
    pub async fn sync_stream(
        &self,
        name: &str,
        state: &SyncState,
    ) -> Result<(Vec<Record>, SyncState)> {
        let entry = self
            .registry
            .get(name)
            .ok_or_else(|| ConnectorError::UnknownStream(name.to_string()))?;

        let since = state.get(name);
        tracing::info!(stream = name, since = ?since, "Syncing stream");

        let rows = self.client.fetch(name, since).await?;

        let mut next = state.clone();
        let records = (entry.sync)(&entry.descriptor, rows, &mut next);
        Ok((records, next))
    }

    /// Sync every registered stream in order.
    pub async fn run(&self, state: &mut SyncState, sink: &mut dyn RecordSink) -> Result<RunSummary> {
        let names: Vec<String> = self
            .registry
            .names()
            .into_iter()
            .map(str::to_string)
            .collect();
        self.run_streams(&names, state, sink).await
    }

    /// Sync the selected streams in registry order.
    ///
    /// Each stream emits its schema, its records, then a state checkpoint.
    /// The first failing stream aborts the run; checkpoints already emitted
    /// for earlier streams stand.
    pub async fn run_streams(
        &self,
        names: &[String],
        state: &mut SyncState,
        sink: &mut dyn RecordSink,
    ) -> Result<RunSummary> {
        if let Some(unknown) = names.iter().find(|n| self.registry.get(n).is_none()) {
            return Err(ConnectorError::UnknownStream(unknown.clone()));
        }

        let mut summary = RunSummary::default();

        for entry in self.registry.entries() {
            let descriptor = &entry.descriptor;
            if !names.iter().any(|n| n == descriptor.name) {
                continue;
            }

            sink.emit(Message::schema(descriptor))?;

            let (records, next) = match self.sync_stream(descriptor.name, state).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(stream = descriptor.name, error = %e, "Stream sync failed");
                    sink.flush()?;
                    return Err(e);
                }
            };

            let count = records.len();
            for record in records {
                sink.emit(Message::record(record, now_rfc3339()))?;
            }

            *state = next;
            sink.emit(Message::state(state))?;

            let bookmark = state.get(descriptor.name).map(str::to_string);
            tracing::info!(
                stream = descriptor.name,
                records = count,
                bookmark = ?bookmark,
                "Stream synced"
            );
            summary.streams.push(StreamSummary {
                stream: descriptor.name,
                records: count,
                bookmark,
            });
        }

        sink.flush()?;
        Ok(summary)
    }

    /// Confirm the API is reachable by fetching the first stream.
    pub async fn check(&self) -> Result<usize> {
        let first = self
            .registry
            .entries()
            .first()
            .ok_or_else(|| ConnectorError::Internal(anyhow::anyhow!("No streams registered")))?;

        let rows = self.client.fetch(first.descriptor.name, None).await?;
        tracing::info!(stream = first.descriptor.name, rows = rows.len(), "Connection check passed");
        Ok(rows.len())
    }
}
