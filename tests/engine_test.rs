//! Engine integration tests.
//!
//! These run the full pacing loop against an in-memory record sink,
//! so no listener service is required.

use async_trait::async_trait;
use feed_core::{FieldSpec, GeoPoint, Schema, TypeTag};
use feed_emitter::RecordSink;
use loadfeed::{EngineConfig, EngineState, LoadEngine, Mode};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Sink that records every submitted body.
#[derive(Default)]
struct MemorySink {
    bodies: Mutex<Vec<String>>,
}

impl MemorySink {
    fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn submit(&self, body: String) {
        self.bodies.lock().unwrap().push(body);
    }
}

fn id_name_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::new("id", TypeTag::String),
        FieldSpec::new("name", TypeTag::String),
    ])
    .unwrap()
}

fn base_config(app_dir: &Path, mode: Mode, schema: Schema) -> EngineConfig {
    EngineConfig {
        schema,
        frequency_hz: 100.0,
        geo_origin: GeoPoint::new(41.41187, -2.22589),
        radius_meters: 1000.0,
        mode,
        data_file_name: None,
        listener_url: "http://localhost:9999/ingest".to_string(),
        remote_data_service_url: None,
        app_dir: app_dir.to_path_buf(),
        corpus_file: "warandpeace.txt".to_string(),
    }
}

fn write_data_file(app_dir: &Path, name: &str, contents: &str) {
    let public = app_dir.join("public");
    std::fs::create_dir_all(&public).unwrap();
    std::fs::write(public.join(name), contents).unwrap();
}

#[tokio::test]
async fn test_replay_stops_after_exactly_table_length_ticks() {
    let dir = tempfile::tempdir().unwrap();
    write_data_file(dir.path(), "data.txt", "{\"a\":1}\n{\"a\":2}\n{\"a\":3}\n");

    let mut config = base_config(dir.path(), Mode::Replay, id_name_schema());
    config.data_file_name = Some("data.txt".to_string());

    let sink = Arc::new(MemorySink::default());
    let mut engine = LoadEngine::new(config, sink.clone());

    engine.run().await.unwrap();

    let bodies = sink.bodies();
    assert_eq!(bodies, vec![r#"{"a":1}"#, r#"{"a":2}"#, r#"{"a":3}"#]);
    assert_eq!(engine.state(), EngineState::Stopped);
}

#[tokio::test]
async fn test_replay_delimited_maps_columns_onto_field_names() {
    let dir = tempfile::tempdir().unwrap();
    write_data_file(dir.path(), "data.txt", "1;foo\n2;bar\n");

    let mut config = base_config(dir.path(), Mode::Replay, id_name_schema());
    config.data_file_name = Some("data.txt".to_string());

    let sink = Arc::new(MemorySink::default());
    let mut engine = LoadEngine::new(config, sink.clone());

    engine.run().await.unwrap();

    let bodies = sink.bodies();
    assert_eq!(bodies.len(), 2);
    let first: serde_json::Value = serde_json::from_str(&bodies[0]).unwrap();
    assert_eq!(first, serde_json::json!({"id": "1", "name": "foo"}));
    let second: serde_json::Value = serde_json::from_str(&bodies[1]).unwrap();
    assert_eq!(second, serde_json::json!({"id": "2", "name": "bar"}));
}

#[tokio::test]
async fn test_replay_download_failure_emits_nothing() {
    let dir = tempfile::tempdir().unwrap();

    let mut config = base_config(dir.path(), Mode::Replay, id_name_schema());
    config.data_file_name = Some("data.txt".to_string());
    // Port 1 refuses connections locally.
    config.remote_data_service_url = Some("http://127.0.0.1:1".to_string());

    let sink = Arc::new(MemorySink::default());
    let mut engine = LoadEngine::new(config, sink.clone());

    // A failed download is not an error; the engine just never starts.
    engine.run().await.unwrap();

    assert!(sink.bodies().is_empty());
    assert_eq!(engine.state(), EngineState::Idle);
}

#[tokio::test]
async fn test_synthetic_runs_until_cancelled() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("warandpeace.txt"),
        "Well, Prince, so Genoa and Lucca are now just family estates of the Buonapartes.",
    )
    .unwrap();

    let schema = Schema::new(vec![
        FieldSpec::new("id", TypeTag::Long),
        FieldSpec::new("msg", TypeTag::String),
    ])
    .unwrap();
    let config = base_config(dir.path(), Mode::Synthetic, schema);

    let sink = Arc::new(MemorySink::default());
    let mut engine = LoadEngine::new(config, sink.clone());
    let token = engine.cancellation_token();

    let before = chrono_millis();
    // The run does not finish on its own.
    let result = tokio::time::timeout(Duration::from_millis(300), engine.run()).await;
    assert!(result.is_err(), "synthetic mode stopped without cancellation");
    let after = chrono_millis();

    let bodies = sink.bodies();
    assert!(bodies.len() >= 2, "expected several emissions, got {}", bodies.len());

    for body in &bodies {
        let record: serde_json::Value = serde_json::from_str(body).unwrap();
        let id = record["id"].as_i64().unwrap();
        assert!(id >= before && id <= after, "id {id} is not a capture-time timestamp");
        let msg = record["msg"].as_str().unwrap();
        assert!(!msg.trim().is_empty());
    }

    // Cancellation stops it promptly.
    token.cancel();
    tokio::time::timeout(Duration::from_millis(200), engine.run())
        .await
        .expect("cancelled engine did not stop")
        .unwrap();
    assert_eq!(engine.state(), EngineState::Stopped);
}

#[tokio::test]
async fn test_synthetic_missing_corpus_is_fatal_before_ticking() {
    let dir = tempfile::tempdir().unwrap();

    let config = base_config(dir.path(), Mode::Synthetic, id_name_schema());
    let sink = Arc::new(MemorySink::default());
    let mut engine = LoadEngine::new(config, sink.clone());

    let result = engine.run().await;
    assert!(result.is_err());
    assert!(sink.bodies().is_empty());
    assert_eq!(engine.state(), EngineState::Idle);
}

#[tokio::test]
async fn test_replay_missing_local_file_is_visible_error() {
    let dir = tempfile::tempdir().unwrap();

    let mut config = base_config(dir.path(), Mode::Replay, id_name_schema());
    config.data_file_name = Some("missing.txt".to_string());

    let sink = Arc::new(MemorySink::default());
    let mut engine = LoadEngine::new(config, sink.clone());

    assert!(engine.run().await.is_err());
    assert!(sink.bodies().is_empty());
}

fn chrono_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}
