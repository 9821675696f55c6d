//! Source resolution: turn a media reference into uploadable bytes.
//!
//! A source reference may be a remote HTTP(S) URL, a `file://` URL, or a
//! local path. This is the orchestrator's `Preparing` state.

use crate::error::{CapstreamError, Result};
use std::path::{Path, PathBuf};

/// A resolved media source ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSource {
    /// Raw media bytes to send to the provider.
    pub bytes: Vec<u8>,
    /// Human-readable label (URL or local path) used in error context.
    pub label: String,
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn local_path(value: &str) -> PathBuf {
    match value.strip_prefix("file://") {
        Some(stripped) => PathBuf::from(stripped),
        None => PathBuf::from(value),
    }
}

async fn fetch_remote(url: &str) -> Result<ResolvedSource> {
    let response = reqwest::get(url).await.map_err(|e| {
        CapstreamError::SourceUnavailable {
            source_ref: url.to_string(),
            message: format!("failed to download remote media: {e}"),
        }
    })?;

    if !response.status().is_success() {
        return Err(CapstreamError::SourceUnavailable {
            source_ref: url.to_string(),
            message: format!("remote media returned HTTP {}", response.status()),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| CapstreamError::SourceUnavailable {
            source_ref: url.to_string(),
            message: format!("failed to read remote media body: {e}"),
        })?;

    if bytes.is_empty() {
        return Err(CapstreamError::SourceUnavailable {
            source_ref: url.to_string(),
            message: "remote media returned empty content".to_string(),
        });
    }

    Ok(ResolvedSource {
        bytes: bytes.to_vec(),
        label: url.to_string(),
    })
}

fn read_local(source_ref: &str, path: &Path) -> Result<ResolvedSource> {
    if !path.exists() {
        return Err(CapstreamError::SourceUnavailable {
            source_ref: source_ref.to_string(),
            message: format!("local media file not found: {}", path.display()),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| CapstreamError::SourceUnavailable {
        source_ref: source_ref.to_string(),
        message: format!("failed to read local media file: {e}"),
    })?;

    if bytes.is_empty() {
        return Err(CapstreamError::SourceUnavailable {
            source_ref: source_ref.to_string(),
            message: format!("local media file is empty: {}", path.display()),
        });
    }

    Ok(ResolvedSource {
        bytes,
        label: path.display().to_string(),
    })
}

/// Resolve a media reference into raw bytes.
///
/// # Errors
///
/// Returns [`CapstreamError::SourceUnavailable`] when the reference is empty,
/// the remote download fails or returns a non-2xx status, the local file does
/// not exist, or the content is empty.
pub async fn resolve_source(source_ref: &str) -> Result<ResolvedSource> {
    let trimmed = source_ref.trim();
    if trimmed.is_empty() {
        return Err(CapstreamError::SourceUnavailable {
            source_ref: source_ref.to_string(),
            message: "source reference is empty".to_string(),
        });
    }

    if is_http_url(trimmed) {
        return fetch_remote(trimmed).await;
    }

    read_local(trimmed, &local_path(trimmed))
}
