// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Output records and the message envelope written for the pipeline host.

use crate::models::{StreamDescriptor, SyncState};
use serde::Serialize;
use serde_json::Value;

/// One upstream row, passed through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Stream the row belongs to
    pub stream: String,
    /// Row payload exactly as returned by the API
    pub data: Value,
}

impl Record {
    pub fn new(stream: &str, data: Value) -> Self {
        Self {
            stream: stream.to_string(),
            data,
        }
    }
}

/// Message envelope emitted to the downstream pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Message {
    Schema {
        stream: String,
        key_properties: Vec<String>,
        bookmark_properties: Vec<String>,
        schema: Value,
    },
    Record {
        stream: String,
        data: Value,
        emitted_at: String,
    },
    State {
        value: SyncState,
    },
}

impl Message {
    pub fn schema(stream: &StreamDescriptor) -> Self {
        Message::Schema {
            stream: stream.name.to_string(),
            key_properties: stream.primary_key.iter().map(|k| k.to_string()).collect(),
            bookmark_properties: vec![stream.cursor_field.to_string()],
            schema: stream.json_schema.clone(),
        }
    }

    pub fn record(record: Record, emitted_at: String) -> Self {
        Message::Record {
            stream: record.stream,
            data: record.data,
            emitted_at,
        }
    }

    pub fn state(state: &SyncState) -> Self {
        Message::State {
            value: state.clone(),
        }
    }
}

/// Static catalog describing the connector and its streams.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub name: &'static str,
    pub version: &'static str,
    pub streams: Vec<StreamDescriptor>,
}
