// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Per-stream bookmark state.
//!
//! The library only reads and updates this map. Persistence belongs to the
//! host; `load`/`save` exist for the bundled CLI host.

use crate::error::{ConnectorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Mapping from stream name to the last-seen cursor value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncState {
    bookmarks: BTreeMap<String, String>,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last bookmark for a stream, if any.
    pub fn get(&self, stream: &str) -> Option<&str> {
        self.bookmarks.get(stream).map(String::as_str)
    }

    /// Replace the bookmark for a stream.
    pub fn set(&mut self, stream: &str, cursor: impl Into<String>) {
        self.bookmarks.insert(stream.to_string(), cursor.into());
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// Load state from a JSON file. A missing file is empty state.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No state file, starting fresh");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConnectorError::State(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&contents).map_err(|e| {
            ConnectorError::State(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Write state to a JSON file, replacing it atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConnectorError::State(e.to_string()))?;

        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, json)
            .and_then(|_| std::fs::rename(&tmp, path))
            .map_err(|e| {
                ConnectorError::State(format!("Failed to write {}: {}", path.display(), e))
            })?;

        tracing::debug!(path = %path.display(), streams = self.bookmarks.len(), "State saved");
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SyncState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            bookmarks: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
