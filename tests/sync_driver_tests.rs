// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end sync cycles against a mock FitSense API.
//!
//! These exercise the bookmark contract: rows pass through in upstream order,
//! and each stream's bookmark moves to the greatest `updated_at` seen.

mod common;

use fitsense_connector::error::ConnectorError;
use fitsense_connector::models::{Message, SyncState};
use fitsense_connector::services::MemorySink;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_rows(server: &MockServer, endpoint: &str, rows: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", endpoint)))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_two_activities_from_empty_state() {
    let server = MockServer::start().await;
    mount_rows(&server, "activities", common::fixture("activities.json")).await;

    let connector = common::test_connector(&server);
    let state = SyncState::new();

    let (records, next) = connector.sync_stream("activities", &state).await.unwrap();

    let ids: Vec<&str> = records
        .iter()
        .map(|r| r.data["activity_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a1", "a2"]);
    assert!(records.iter().all(|r| r.stream == "activities"));
    assert_eq!(
        serde_json::to_value(&next).unwrap(),
        json!({"activities": "2024-01-02T00:00:00Z"})
    );
    // Input state is left alone
    assert!(state.is_empty());
}

#[tokio::test]
async fn test_bookmark_is_sent_as_since() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sleep"))
        .and(query_param("since", "2024-01-01T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::fixture("sleep.json")))
        .expect(1)
        .mount(&server)
        .await;

    let connector = common::test_connector(&server);
    let state: SyncState = [("sleep", "2024-01-01T00:00:00Z")].into_iter().collect();

    let (records, next) = connector.sync_stream("sleep", &state).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(next.get("sleep"), Some("2024-01-02T07:00:00Z"));
}

#[tokio::test]
async fn test_empty_fetch_leaves_state_unchanged() {
    let server = MockServer::start().await;
    mount_rows(&server, "hr_series", json!([])).await;

    let connector = common::test_connector(&server);
    let state: SyncState = [("hr_series", "2024-02-01T00:00:00Z")].into_iter().collect();

    let (records, next) = connector.sync_stream("hr_series", &state).await.unwrap();

    assert!(records.is_empty());
    assert_eq!(next, state);
}

#[tokio::test]
async fn test_unknown_stream_makes_no_request() {
    let server = MockServer::start().await;
    let connector = common::test_connector(&server);

    let err = connector
        .sync_stream("steps", &SyncState::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ConnectorError::UnknownStream(ref s) if s == "steps"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_run_emits_schema_records_state_per_stream() {
    let server = MockServer::start().await;
    mount_rows(&server, "activities", common::fixture("activities.json")).await;
    mount_rows(&server, "sleep", common::fixture("sleep.json")).await;
    mount_rows(
        &server,
        "hr_series",
        json!([
            {"user_id": "u1", "ts": "2024-01-01T00:00:00Z", "bpm": 58},
            {"user_id": "u1", "ts": "2024-01-01T00:00:05Z", "bpm": 60, "updated_at": "2024-01-01T00:01:00Z"}
        ]),
    )
    .await;

    let connector = common::test_connector(&server);
    let mut state = SyncState::new();
    let mut sink = MemorySink::new();

    let summary = connector.run(&mut state, &mut sink).await.unwrap();

    assert_eq!(summary.total_records(), 5);
    assert_eq!(
        summary.streams.iter().map(|s| s.stream).collect::<Vec<_>>(),
        vec!["activities", "sleep", "hr_series"]
    );

    let kinds: Vec<&str> = sink
        .messages
        .iter()
        .map(|m| match m {
            Message::Schema { .. } => "schema",
            Message::Record { .. } => "record",
            Message::State { .. } => "state",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "schema", "record", "record", "state", // activities
            "schema", "record", "state", // sleep
            "schema", "record", "record", "state", // hr_series
        ]
    );

    assert_eq!(sink.records_for("hr_series").len(), 2);
    assert_eq!(
        serde_json::to_value(&state).unwrap(),
        json!({
            "activities": "2024-01-02T00:00:00Z",
            "hr_series": "2024-01-01T00:01:00Z",
            "sleep": "2024-01-02T07:00:00Z"
        })
    );
    assert_eq!(sink.last_state(), Some(&state));
}

#[tokio::test]
async fn test_failing_stream_aborts_run_but_keeps_earlier_bookmarks() {
    let server = MockServer::start().await;
    mount_rows(&server, "activities", common::fixture("activities.json")).await;

    Mock::given(method("GET"))
        .and(path("/sleep"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let connector = common::test_connector(&server);
    let mut state = SyncState::new();
    let mut sink = MemorySink::new();

    let err = connector.run(&mut state, &mut sink).await.unwrap_err();

    assert_eq!(err.http_status(), Some(reqwest::StatusCode::SERVICE_UNAVAILABLE));
    assert_eq!(state.get("activities"), Some("2024-01-02T00:00:00Z"));
    assert!(state.get("sleep").is_none());
    assert!(sink.records_for("hr_series").is_empty());

    // hr_series was never requested
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() != "/hr_series"));
}

#[tokio::test]
async fn test_run_streams_restricts_selection() {
    let server = MockServer::start().await;
    mount_rows(&server, "sleep", common::fixture("sleep.json")).await;

    let connector = common::test_connector(&server);
    let mut state = SyncState::new();
    let mut sink = MemorySink::new();

    let summary = connector
        .run_streams(&["sleep".to_string()], &mut state, &mut sink)
        .await
        .unwrap();

    assert_eq!(summary.streams.len(), 1);
    assert_eq!(summary.streams[0].bookmark.as_deref(), Some("2024-01-02T07:00:00Z"));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_check_fetches_first_stream() {
    let server = MockServer::start().await;
    mount_rows(&server, "activities", json!([])).await;

    let connector = common::test_connector(&server);
    assert_eq!(connector.check().await.unwrap(), 0);
}
