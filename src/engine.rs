//! The pacing engine: converts the target frequency into a sequence of
//! timed emissions.
//!
//! One logical tick sequence runs at a time. Each tick synthesizes one
//! record (or takes the next replay line), submits it to the sink, and
//! only then sleeps for the tick interval, so the inter-emission time
//! drifts upward by the cost of synthesis and submission rather than
//! tracking a fixed wall-clock grid. Ticks are never skipped or
//! coalesced; under load the engine self-throttles.

use crate::config::{EngineConfig, Mode};
use anyhow::{Context, Result};
use feed_emitter::RecordSink;
use feed_generator::{Corpus, RecordGenerator};
use feed_source::{fetch_to_file, ingest_file, ReplayCursor};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Tick interval for a target frequency: `floor(1000 / frequency)`
/// milliseconds.
pub fn tick_interval(frequency_hz: f64) -> Duration {
    Duration::from_millis((1000.0 / frequency_hz).floor() as u64)
}

/// Engine lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Created but not yet ticking (or stalled before ingestion).
    Idle,
    /// Emitting records.
    Running,
    /// Terminal: the replay table is exhausted or the engine was
    /// cancelled. Synthetic mode only reaches this through
    /// cancellation.
    Stopped,
}

/// The record generation/playback engine.
pub struct LoadEngine {
    config: EngineConfig,
    sink: Arc<dyn RecordSink>,
    cancel: CancellationToken,
    state: EngineState,
}

impl LoadEngine {
    /// Create an engine delivering to the given sink.
    pub fn new(config: EngineConfig, sink: Arc<dyn RecordSink>) -> Self {
        Self {
            config,
            sink,
            cancel: CancellationToken::new(),
            state: EngineState::Idle,
        }
    }

    /// A token that stops the engine when cancelled. In-flight
    /// submissions are not interrupted; only new ticks are suppressed.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Run the engine until it stops.
    ///
    /// Replay mode stops on its own once the line table is exhausted;
    /// synthetic mode runs until the cancellation token fires.
    pub async fn run(&mut self) -> Result<()> {
        match self.config.mode {
            Mode::Synthetic => self.run_synthetic().await,
            Mode::Replay => self.run_replay().await,
        }
    }

    async fn run_synthetic(&mut self) -> Result<()> {
        let corpus_path = self.config.app_dir.join(&self.config.corpus_file);
        tracing::info!("Reading corpus {corpus_path:?}");
        let corpus = Corpus::from_file(&corpus_path)
            .with_context(|| format!("Failed to load corpus {corpus_path:?}"))?;

        let mut generator = RecordGenerator::new(
            self.config.schema.clone(),
            corpus,
            self.config.geo_origin,
            self.config.radius_meters,
        );

        let interval = tick_interval(self.config.frequency_hz);
        tracing::info!(
            "Starting synthetic generation at {} Hz (tick interval {interval:?})",
            self.config.frequency_hz
        );
        self.state = EngineState::Running;

        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            let record = generator.next_record();
            let body = serde_json::Value::Object(record).to_string();
            tracing::debug!("Emitting record: {body}");
            self.sink.submit(body).await;

            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }
        }

        self.state = EngineState::Stopped;
        tracing::info!("Synthetic generation cancelled");
        Ok(())
    }

    async fn run_replay(&mut self) -> Result<()> {
        let file_name = self
            .config
            .data_file_name
            .clone()
            .context("Replay mode requires a data file name")?;
        let path = self.config.app_dir.join("public").join(&file_name);

        if let Some(service) = &self.config.remote_data_service_url {
            let url = format!("{}/{}", service.trim_end_matches('/'), file_name);
            tracing::info!("Trying to download {url}");
            if let Err(e) = fetch_to_file(&url, &path).await {
                // Non-fatal: without a complete local file the engine
                // never transitions to ingestion and nothing is
                // emitted.
                tracing::warn!("Can't download data file: {e:#}");
                return Ok(());
            }
        }

        let table = ingest_file(&path)
            .with_context(|| format!("Failed to ingest data file {path:?}"))?;
        tracing::info!(
            "Ingested {} usable lines ({:?}) from {:?}",
            table.len(),
            table.format(),
            path
        );

        let interval = tick_interval(self.config.frequency_hz);
        let mut cursor = ReplayCursor::new();
        self.state = EngineState::Running;

        while !cursor.is_exhausted(&table) {
            if self.cancel.is_cancelled() {
                break;
            }

            let body = match table.record_body(cursor.position(), &self.config.schema) {
                Some(body) => body,
                None => break,
            };
            tracing::debug!("Emitting line {}: {body}", cursor.position());
            self.sink.submit(body).await;
            cursor.advance();

            // No trailing sleep after the final emission.
            if cursor.is_exhausted(&table) {
                break;
            }

            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }
        }

        self.state = EngineState::Stopped;
        tracing::info!("Replay finished after {} emissions", cursor.position());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_interval_is_floor_of_millis() {
        assert_eq!(tick_interval(10.0), Duration::from_millis(100));
        assert_eq!(tick_interval(1.0), Duration::from_millis(1000));
        assert_eq!(tick_interval(3.0), Duration::from_millis(333));
        assert_eq!(tick_interval(0.5), Duration::from_millis(2000));
    }
}
