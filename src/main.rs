//! Command-line interface for loadfeed
//!
//! # Usage Examples
//!
//! ```bash
//! # Synthetic generation at 10 records/second
//! LISTENER=http://listener:8080/ingest \
//! APPDEF='{"fields": [{"name": "id", "type": "Long"}, {"name": "msg", "type": "String"}], "frequency": 10}' \
//! APPDIR=/srv/loadfeed \
//! LOCATION='{"latitude": 41.41187, "longitude": -2.22589}' \
//! loadfeed
//!
//! # Replay a downloaded data file
//! APPDEF='{"fields": [{"name": "id", "type": "String"}, {"name": "name", "type": "String"}], "frequency": 5, "byod": "yes", "fname": "data.txt"}' \
//! DATASERVICE=http://dataservice:9000 \
//! loadfeed
//! ```

use anyhow::Result;
use clap::Parser;
use feed_emitter::HttpEmitter;
use loadfeed::{AppDef, EngineConfig, LoadEngine};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "loadfeed")]
#[command(about = "Schema-driven record generator and replay engine feeding an HTTP listener")]
struct Cli {
    /// Destination URL for emitted records
    #[arg(long, env = "LISTENER")]
    listener: String,

    /// Application definition JSON: fields, frequency, byod, fname
    #[arg(long, env = "APPDEF")]
    app_def: String,

    /// Application directory holding the corpus file and the public/
    /// data file area
    #[arg(long, env = "APPDIR")]
    app_dir: PathBuf,

    /// Geographic origin for location sampling, as JSON
    /// {"latitude": .., "longitude": ..}
    #[arg(long, env = "LOCATION")]
    location: String,

    /// Remote data service base URL for bring-your-own-data downloads
    #[arg(long, env = "DATASERVICE")]
    data_service: Option<String>,

    /// Sampling radius in meters around the origin
    #[arg(long, default_value_t = 1000.0)]
    radius_meters: f64,

    /// Corpus file name within the application directory
    #[arg(long, default_value = "warandpeace.txt")]
    corpus_file: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let app_def = AppDef::from_json(&cli.app_def)?;
    let config = EngineConfig::from_parts(
        &app_def,
        &cli.location,
        cli.listener,
        cli.data_service,
        cli.app_dir,
        cli.radius_meters,
        cli.corpus_file,
    )?;

    let emitter = Arc::new(HttpEmitter::new(config.listener_url.clone()));
    let mut engine = LoadEngine::new(config, emitter.clone());

    // Ctrl-C suppresses new ticks; in-flight submissions finish on
    // their own.
    let token = engine.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            token.cancel();
        }
    });

    engine.run().await?;

    tracing::info!(
        "Engine stopped: {} delivered, {} failed",
        emitter.delivered(),
        emitter.failed()
    );
    Ok(())
}
