// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Destinations for connector messages.

use crate::models::{Message, SyncState};
use serde_json::Value;
use std::io::{self, Write};

/// Receives schema, record and state messages in emission order.
pub trait RecordSink {
    fn emit(&mut self, message: Message) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn emit(&mut self, message: Message) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, &message)?;
        self.writer.write_all(b"\n")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Collects messages in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub messages: Vec<Message>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record payloads for one stream, in emission order.
    pub fn records_for(&self, stream: &str) -> Vec<&Value> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::Record {
                    stream: s, data, ..
                } if s == stream => Some(data),
                _ => None,
            })
            .collect()
    }

    /// Most recent state checkpoint, if any.
    pub fn last_state(&self) -> Option<&SyncState> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::State { value } => Some(value),
            _ => None,
        })
    }
}

impl RecordSink for MemorySink {
    fn emit(&mut self, message: Message) -> io::Result<()> {
        self.messages.push(message);
        Ok(())
    }
}
