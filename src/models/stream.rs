// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Static stream descriptors for the FitSense resource types.

use serde::Serialize;
use serde_json::{json, Value};

/// Cursor field shared by every FitSense stream.
pub const CURSOR_FIELD: &str = "updated_at";

pub const ACTIVITIES: &str = "activities";
pub const SLEEP: &str = "sleep";
pub const HR_SERIES: &str = "hr_series";

/// Immutable metadata for one synced resource type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamDescriptor {
    /// Stream name, also the API endpoint path segment
    pub name: &'static str,
    /// Primary key field(s), in order
    pub primary_key: &'static [&'static str],
    /// Field used as the incremental bookmark
    pub cursor_field: &'static str,
    /// JSON Schema for rows of this stream
    pub json_schema: Value,
}

impl StreamDescriptor {
    /// Workout and activity sessions.
    pub fn activities() -> Self {
        Self {
            name: ACTIVITIES,
            primary_key: &["activity_id"],
            cursor_field: CURSOR_FIELD,
            json_schema: json!({
                "type": "object",
                "properties": {
                    "activity_id": {"type": "string"},
                    "user_id": {"type": "string"},
                    "start_ts": {"type": "string", "format": "date-time"},
                    "end_ts": {"type": "string", "format": "date-time"},
                    "type": {"type": "string"},
                    "calories": {"type": "number"},
                    "steps": {"type": "integer"},
                    "avg_hr": {"type": "number"},
                    "max_hr": {"type": "number"},
                    "distance_km": {"type": "number"},
                    "updated_at": {"type": "string", "format": "date-time"},
                    "source_json": {}
                },
                "required": ["activity_id", "user_id", "start_ts", "end_ts", "updated_at"]
            }),
        }
    }

    /// Nightly sleep sessions.
    pub fn sleep() -> Self {
        Self {
            name: SLEEP,
            primary_key: &["sleep_id"],
            cursor_field: CURSOR_FIELD,
            json_schema: json!({
                "type": "object",
                "properties": {
                    "sleep_id": {"type": "string"},
                    "user_id": {"type": "string"},
                    "date": {"type": "string", "format": "date"},
                    "duration_min": {"type": "integer"},
                    "stages_json": {},
                    "updated_at": {"type": "string", "format": "date-time"}
                },
                "required": ["sleep_id", "user_id", "date", "updated_at"]
            }),
        }
    }

    /// Heart-rate samples, keyed by user and timestamp.
    pub fn hr_series() -> Self {
        Self {
            name: HR_SERIES,
            primary_key: &["user_id", "ts"],
            cursor_field: CURSOR_FIELD,
            json_schema: json!({
                "type": "object",
                "properties": {
                    "user_id": {"type": "string"},
                    "ts": {"type": "string", "format": "date-time"},
                    "bpm": {"type": "integer"},
                    "updated_at": {"type": "string", "format": "date-time"}
                },
                "required": ["user_id", "ts", "updated_at"]
            }),
        }
    }

    /// Fields listed under `required` in the schema.
    pub fn required_fields(&self) -> Vec<&str> {
        self.json_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|fields| fields.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Cursor value of a row, if it carries a non-empty string there.
    pub fn cursor_of<'a>(&self, row: &'a Value) -> Option<&'a str> {
        row.get(self.cursor_field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}
