//! Transcription provider boundary.
//!
//! The provider exposes three primitives: upload media bytes, start a job,
//! poll a job. The wire format is HTTP+JSON (see [`http`]) but the
//! orchestrator only depends on this trait, which keeps it testable with
//! [`MockProvider`].

pub mod http;

use crate::error::{CapstreamError, Result};
use crate::token::{Segment, Word};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Opaque handle returned by a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadHandle(pub String);

/// Provider-assigned transcription job identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobId(pub String);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider-reported job status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Queued,
    Processing,
    Completed,
    Error,
}

/// One poll response from the provider.
///
/// A completed job carries some combination of word-level timestamps,
/// segment/utterance spans, full transcript text, and overall confidence;
/// an errored job carries `error` text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PollResponse {
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub confidence: Option<f32>,
    #[serde(default)]
    pub words: Option<Vec<Word>>,
    #[serde(default)]
    pub utterances: Option<Vec<Segment>>,
    #[serde(default)]
    pub segments: Option<Vec<Segment>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PollResponse {
    /// Shorthand for a response with only a status.
    pub fn with_status(status: JobStatus) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }
}

/// External transcription service: upload → start job → poll.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// Upload raw media bytes, returning a handle the job can reference.
    async fn upload(&self, bytes: &[u8]) -> Result<UploadHandle>;

    /// Start a transcription job for previously uploaded media.
    async fn start_job(&self, upload: &UploadHandle) -> Result<JobId>;

    /// Fetch the current state of a job.
    async fn poll_job(&self, job: &JobId) -> Result<PollResponse>;
}

/// Scripted provider for testing the orchestrator.
///
/// Poll responses are consumed in order; when the script runs out, the last
/// response repeats (so a trailing `Processing` simulates a stuck job).
#[derive(Debug, Default)]
pub struct MockProvider {
    fail_upload: bool,
    fail_start: bool,
    poll_script: Mutex<VecDeque<PollResponse>>,
    last_response: Mutex<Option<PollResponse>>,
    polls_issued: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the scripted poll responses, consumed in order.
    pub fn with_poll_script(self, responses: Vec<PollResponse>) -> Self {
        *self
            .poll_script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = responses.into();
        self
    }

    /// Configure the mock to reject the upload.
    pub fn with_upload_failure(mut self) -> Self {
        self.fail_upload = true;
        self
    }

    /// Configure the mock to reject the job start.
    pub fn with_start_failure(mut self) -> Self {
        self.fail_start = true;
        self
    }

    /// Number of polls the orchestrator has issued so far.
    pub fn polls_issued(&self) -> usize {
        self.polls_issued.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptionProvider for MockProvider {
    async fn upload(&self, bytes: &[u8]) -> Result<UploadHandle> {
        if self.fail_upload {
            return Err(CapstreamError::UploadRejected {
                message: "mock upload rejection".to_string(),
            });
        }
        Ok(UploadHandle(format!("mock-upload-{}", bytes.len())))
    }

    async fn start_job(&self, upload: &UploadHandle) -> Result<JobId> {
        if self.fail_start {
            return Err(CapstreamError::JobStartRejected {
                message: "mock job start rejection".to_string(),
            });
        }
        Ok(JobId(format!("mock-job-for-{}", upload.0)))
    }

    async fn poll_job(&self, job: &JobId) -> Result<PollResponse> {
        self.polls_issued.fetch_add(1, Ordering::SeqCst);

        let next = self
            .poll_script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        let mut last = self
            .last_response
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match next {
            Some(response) => {
                *last = Some(response.clone());
                Ok(response)
            }
            None => last.clone().ok_or_else(|| CapstreamError::PollFailed {
                job_id: job.0.clone(),
                message: "mock poll script exhausted".to_string(),
            }),
        }
    }
}
