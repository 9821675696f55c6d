//! Error types for capstream.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CapstreamError {
    // Source resolution errors
    #[error("Transcript source unavailable ({source_ref}): {message}")]
    SourceUnavailable { source_ref: String, message: String },

    // Provider round-trip errors
    #[error("Provider rejected upload: {message}")]
    UploadRejected { message: String },

    #[error("Provider rejected job start: {message}")]
    JobStartRejected { message: String },

    #[error("Polling job {job_id} failed: {message}")]
    PollFailed { job_id: String, message: String },

    #[error("Provider reported an error for job {job_id}: {message}")]
    ProviderReportedError { job_id: String, message: String },

    #[error("Transcription job {job_id} timed out after {seconds} seconds")]
    TimedOut { job_id: String, seconds: u64 },

    // Mapping errors
    #[error("Transcription job {job_id} produced zero tokens")]
    EmptyTranscript { job_id: String },

    #[error(
        "Unable to map transcription into timed tokens (job {job_id}, source {source_label}): {message}"
    )]
    MappingFailed {
        job_id: String,
        source_label: String,
        message: String,
    },

    #[error("Transcription job cancelled")]
    Cancelled,

    // Configuration errors
    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP transport errors
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
}

impl CapstreamError {
    /// Extract the innermost provider/transport message without the variant prefix.
    ///
    /// Used when re-wrapping a provider error with job/source context so the
    /// original cause text is preserved rather than double-prefixed.
    pub fn provider_message(&self) -> String {
        match self {
            CapstreamError::UploadRejected { message }
            | CapstreamError::JobStartRejected { message }
            | CapstreamError::PollFailed { message, .. }
            | CapstreamError::ProviderReportedError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, CapstreamError>;
