//! HTTP transcription provider client (AssemblyAI-shaped wire format).
//!
//! Three endpoints: `POST {base}/upload` with raw bytes, `POST
//! {base}/transcript` to start a job, `GET {base}/transcript/{id}` to poll.

use crate::config::ProviderConfig;
use crate::error::{CapstreamError, Result};
use crate::provider::{JobId, PollResponse, TranscriptionProvider, UploadHandle};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    upload_url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StartJobResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the transcription provider.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpProvider {
    /// Build a provider from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when no API key is configured (neither in the config
    /// file nor via `CAPSTREAM_API_KEY`).
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| CapstreamError::ConfigInvalidValue {
                key: "provider.api_key".to_string(),
                message: "an API key is required; set it in the config file or CAPSTREAM_API_KEY"
                    .to_string(),
            })?;

        Ok(Self::from_parts(&config.base_url, api_key))
    }

    /// Build a provider from explicit parts (used by tests against a local server).
    pub fn from_parts(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Extract the most useful error text from a non-2xx response.
    ///
    /// Prefers the provider's `{"error": "..."}` body, then the raw body,
    /// then the bare status code.
    async fn error_text(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if body.is_empty() {
            return format!("HTTP {status}");
        }
        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => value
                .get("error")
                .and_then(|e| e.as_str())
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .unwrap_or(body),
            Err(_) => body,
        }
    }
}

#[async_trait]
impl TranscriptionProvider for HttpProvider {
    async fn upload(&self, bytes: &[u8]) -> Result<UploadHandle> {
        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .header("authorization", &self.api_key)
            .header("content-type", "application/octet-stream")
            .body(bytes.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CapstreamError::UploadRejected {
                message: Self::error_text(response).await,
            });
        }

        let payload: UploadResponse = response.json().await?;
        match payload.upload_url {
            Some(url) => Ok(UploadHandle(url)),
            None => Err(CapstreamError::UploadRejected {
                message: payload
                    .error
                    .unwrap_or_else(|| "upload response did not include an upload URL".to_string()),
            }),
        }
    }

    async fn start_job(&self, upload: &UploadHandle) -> Result<JobId> {
        let response = self
            .client
            .post(format!("{}/transcript", self.base_url))
            .header("authorization", &self.api_key)
            .json(&json!({
                "audio_url": upload.0,
                "punctuate": true,
                "format_text": true,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CapstreamError::JobStartRejected {
                message: Self::error_text(response).await,
            });
        }

        let payload: StartJobResponse = response.json().await?;
        match payload.id {
            Some(id) => Ok(JobId(id)),
            None => Err(CapstreamError::JobStartRejected {
                message: payload
                    .error
                    .unwrap_or_else(|| "job start response did not include an id".to_string()),
            }),
        }
    }

    async fn poll_job(&self, job: &JobId) -> Result<PollResponse> {
        let response = self
            .client
            .get(format!("{}/transcript/{}", self.base_url, job.0))
            .header("authorization", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CapstreamError::PollFailed {
                job_id: job.0.clone(),
                message: Self::error_text(response).await,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;

    #[test]
    fn test_new_requires_api_key() {
        let config = ProviderConfig::default();
        let err = HttpProvider::new(&config).unwrap_err();
        assert!(matches!(err, CapstreamError::ConfigInvalidValue { .. }));
    }

    #[test]
    fn test_new_rejects_blank_api_key() {
        let config = ProviderConfig {
            api_key: Some("   ".to_string()),
            ..ProviderConfig::default()
        };
        assert!(HttpProvider::new(&config).is_err());
    }

    #[test]
    fn test_new_accepts_configured_key() {
        let config = ProviderConfig {
            api_key: Some("secret".to_string()),
            ..ProviderConfig::default()
        };
        let provider = HttpProvider::new(&config).unwrap();
        assert_eq!(provider.api_key, "secret");
        assert_eq!(provider.base_url, "https://api.assemblyai.com/v2");
    }

    #[test]
    fn test_from_parts_trims_trailing_slash() {
        let provider = HttpProvider::from_parts("http://localhost:9999/v2/", "k");
        assert_eq!(provider.base_url, "http://localhost:9999/v2");
    }
}
