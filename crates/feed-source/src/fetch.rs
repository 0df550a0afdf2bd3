//! Remote data file fetch for bring-your-own-data replay.

use anyhow::{Context, Result};
use futures::StreamExt;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Fetch a remote data file and persist it at `dest`.
///
/// Issues a HEAD probe first, then streams the body to local storage.
/// The file is flushed and synced before this returns, so ingestion
/// may start as soon as the call succeeds; on any error the caller
/// must not ingest.
pub async fn fetch_to_file(url: &str, dest: &Path) -> Result<()> {
    let client = reqwest::Client::new();

    let head = client
        .head(url)
        .send()
        .await
        .with_context(|| format!("HEAD probe failed for {url}"))?;
    if !head.status().is_success() {
        anyhow::bail!("HEAD probe for {url} returned status {}", head.status());
    }

    let content_type = head
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    let content_length = head
        .headers()
        .get(reqwest::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    tracing::info!("Downloading {url}: content-type {content_type}, content-length {content_length}");

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch {url}"))?;
    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("Download of {url} returned status {status}");
    }

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {parent:?}"))?;
    }

    let mut file = tokio::fs::File::create(dest)
        .await
        .with_context(|| format!("Failed to create {dest:?}"))?;

    let mut stream = response.bytes_stream();
    let mut total = 0usize;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.with_context(|| format!("Failed to read response body from {url}"))?;
        total += chunk.len();
        file.write_all(&chunk)
            .await
            .with_context(|| format!("Failed to write {dest:?}"))?;
    }

    file.flush().await?;
    file.sync_all()
        .await
        .with_context(|| format!("Failed to sync {dest:?}"))?;

    tracing::debug!("Persisted {total} bytes to {dest:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_service_is_an_error() {
        // Port 1 refuses connections locally; the probe must fail
        // without creating the destination file.
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("data.txt");

        let result = fetch_to_file("http://127.0.0.1:1/data.txt", &dest).await;
        assert!(result.is_err());
        assert!(!dest.exists());
    }

    // Success-path tests would require a mock HTTP server, skipping
    // for now.
}
