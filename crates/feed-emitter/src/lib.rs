//! Record delivery to the downstream listener.
//!
//! Delivery is an injected capability: the engine talks to a
//! [`RecordSink`] and never learns how records travel. The production
//! implementation is [`HttpEmitter`], which POSTs each record body to
//! the listener URL on a spawned task so a slow listener can never
//! stall the tick sequence. Failures are counted and logged; they are
//! never raised to the scheduler.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Error type for a single delivery attempt.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// The request never produced a response
    #[error("Failed to submit record to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The listener answered with a non-success status
    #[error("Listener at {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Destination for serialized records.
///
/// `submit` must return once the submission has been issued, not once
/// it has been delivered: the caller treats the tick as done at that
/// point and schedules the next one.
#[async_trait::async_trait]
pub trait RecordSink: Send + Sync {
    /// Submit one serialized record body.
    async fn submit(&self, body: String);
}

/// Fire-and-forget HTTP delivery to a listener endpoint.
pub struct HttpEmitter {
    client: reqwest::Client,
    listener_url: String,
    delivered: Arc<AtomicU64>,
    failed: Arc<AtomicU64>,
}

impl HttpEmitter {
    /// Create an emitter targeting the given listener URL.
    pub fn new(listener_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            listener_url: listener_url.into(),
            delivered: Arc::new(AtomicU64::new(0)),
            failed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of records the listener has acknowledged so far.
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    /// Number of submissions that failed (transport error or
    /// non-success status).
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// The configured listener URL.
    pub fn listener_url(&self) -> &str {
        &self.listener_url
    }
}

async fn send_once(client: &reqwest::Client, url: &str, body: String) -> Result<(), EmitError> {
    let response = client
        .post(url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .map_err(|source| EmitError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(EmitError::Status {
            url: url.to_string(),
            status,
        });
    }
    Ok(())
}

#[async_trait::async_trait]
impl RecordSink for HttpEmitter {
    async fn submit(&self, body: String) {
        let client = self.client.clone();
        let url = self.listener_url.clone();
        let delivered = Arc::clone(&self.delivered);
        let failed = Arc::clone(&self.failed);

        // The response only affects counters and logging, never the
        // caller's scheduling.
        tokio::spawn(async move {
            match send_once(&client, &url, body).await {
                Ok(()) => {
                    delivered.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    failed.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!("Record delivery failed: {e}");
                }
            }
        });
    }
}
