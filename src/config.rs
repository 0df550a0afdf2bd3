//! Engine configuration assembled from the environment-derived
//! application definition.

use anyhow::{Context, Result};
use feed_core::{FieldSpec, GeoPoint, Schema};
use serde::Deserialize;
use std::path::PathBuf;

/// Where records come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Type-driven random synthesis.
    Synthetic,
    /// Replay of previously ingested lines from a data file.
    Replay,
}

/// The application definition carried by the `APPDEF` environment
/// variable: field schema, emission frequency, and replay settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppDef {
    /// Field descriptors, in order.
    pub fields: Vec<FieldSpec>,

    /// Target emissions per second.
    pub frequency: f64,

    /// `"yes"` selects replay of a bring-your-own-data file; anything
    /// else selects synthetic generation.
    #[serde(default)]
    pub byod: Option<String>,

    /// Data file name to fetch/ingest in replay mode.
    #[serde(default)]
    pub fname: Option<String>,
}

impl AppDef {
    /// Parse an application definition from its JSON form.
    ///
    /// Deployment tooling delivers `APPDEF` with single quotes in
    /// place of double quotes; they are normalized before parsing.
    pub fn from_json(raw: &str) -> Result<Self> {
        let normalized = raw.replace('\'', "\"");
        serde_json::from_str(&normalized).context("Failed to parse application definition")
    }

    /// Whether this definition selects replay mode.
    pub fn mode(&self) -> Mode {
        if self.byod.as_deref() == Some("yes") {
            Mode::Replay
        } else {
            Mode::Synthetic
        }
    }
}

/// Immutable process-lifetime engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Field schema for record synthesis and delimited column mapping.
    pub schema: Schema,

    /// Target emissions per second.
    pub frequency_hz: f64,

    /// Center point for location sampling.
    pub geo_origin: GeoPoint,

    /// Sampling radius in meters.
    pub radius_meters: f64,

    /// Record source.
    pub mode: Mode,

    /// Data file name (replay mode).
    pub data_file_name: Option<String>,

    /// Destination URL for emitted records.
    pub listener_url: String,

    /// Remote data service base URL for bring-your-own-data downloads.
    pub remote_data_service_url: Option<String>,

    /// Application directory holding the corpus file and the `public/`
    /// data file area.
    pub app_dir: PathBuf,

    /// Corpus file name within the application directory.
    pub corpus_file: String,
}

impl EngineConfig {
    /// Build a validated configuration from the raw CLI/environment
    /// inputs.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        app_def: &AppDef,
        location_json: &str,
        listener_url: String,
        remote_data_service_url: Option<String>,
        app_dir: PathBuf,
        radius_meters: f64,
        corpus_file: String,
    ) -> Result<Self> {
        let schema = Schema::new(app_def.fields.clone())
            .context("Application definition has no usable fields")?;

        if app_def.frequency <= 0.0 {
            anyhow::bail!("Frequency must be positive, got {}", app_def.frequency);
        }

        let geo_origin: GeoPoint = serde_json::from_str(location_json)
            .context("Failed to parse location (expected {\"latitude\":..,\"longitude\":..})")?;

        let mode = app_def.mode();
        if mode == Mode::Replay && app_def.fname.is_none() {
            anyhow::bail!("Replay mode requires a data file name (fname)");
        }

        Ok(Self {
            schema,
            frequency_hz: app_def.frequency,
            geo_origin,
            radius_meters,
            mode,
            data_file_name: app_def.fname.clone(),
            listener_url,
            remote_data_service_url,
            app_dir,
            corpus_file,
        })
    }
}
