//! Transcription job orchestration.
//!
//! Drives one job through its lifecycle: resolve the media source, upload,
//! start the provider job, poll until it settles, then map the provider's
//! payload into a finalized token stream. The orchestrator is generic over
//! [`TranscriptionProvider`] so the whole flow runs against [`MockProvider`]
//! in tests.
//!
//! [`MockProvider`]: crate::provider::MockProvider

use crate::config::Config;
use crate::error::{CapstreamError, Result};
use crate::provider::{JobId, JobStatus, PollResponse, TranscriptionProvider};
use crate::source::resolve_source;
use crate::token::{Segment, Token, Word};
use crate::tokenize::{Tokenizer, validate};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Progress notifications emitted while a job runs.
///
/// Delivery is best effort over an optional crossbeam channel; a full or
/// disconnected receiver never stalls the job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    Preparing { source_ref: String },
    Uploading { byte_count: usize },
    JobStarted { job_id: String },
    Polling { job_id: String, status: JobStatus },
    Completed { job_id: String, token_count: usize },
    Failed { message: String },
}

/// The shape of a completed job's payload, in preference order.
///
/// Word-level timestamps are the richest form; utterance or segment spans
/// are the fallback when the provider returned no usable words.
#[derive(Debug, Clone)]
pub enum JobOutcome {
    WordLevel {
        words: Vec<Word>,
        full_text: Option<String>,
        confidence: Option<f32>,
    },
    SegmentLevel {
        segments: Vec<Segment>,
    },
    Failed {
        reason: String,
    },
}

impl JobOutcome {
    /// Classify a completed poll response.
    ///
    /// A word is usable when it has non-blank text and both timestamps;
    /// utterances take precedence over segments for the span fallback.
    pub fn from_poll(response: PollResponse) -> Self {
        let PollResponse {
            text,
            confidence,
            words,
            utterances,
            segments,
            ..
        } = response;

        let usable: Vec<Word> = words
            .unwrap_or_default()
            .into_iter()
            .filter(|w| !w.text.trim().is_empty() && w.start_ms.is_some() && w.end_ms.is_some())
            .collect();
        if !usable.is_empty() {
            return JobOutcome::WordLevel {
                words: usable,
                full_text: text,
                confidence,
            };
        }

        match utterances.or(segments) {
            Some(spans) if !spans.is_empty() => JobOutcome::SegmentLevel { segments: spans },
            _ => JobOutcome::Failed {
                reason: "completed response carried no word timestamps and no segment spans"
                    .to_string(),
            },
        }
    }
}

/// Runs transcription jobs end to end against a provider.
pub struct Orchestrator<P: TranscriptionProvider> {
    provider: P,
    tokenizer: Tokenizer,
    poll_interval: Duration,
    poll_timeout: Duration,
    cancel: Arc<AtomicBool>,
    event_tx: Option<crossbeam_channel::Sender<JobEvent>>,
}

impl<P: TranscriptionProvider> Orchestrator<P> {
    /// Orchestrator with default tuning.
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, &Config::default())
    }

    /// Orchestrator with explicit polling and timing configuration.
    pub fn with_config(provider: P, config: &Config) -> Self {
        Self {
            provider,
            tokenizer: Tokenizer::new(config.timing.clone()),
            poll_interval: Duration::from_millis(config.polling.interval_ms),
            poll_timeout: Duration::from_millis(config.polling.timeout_ms),
            cancel: Arc::new(AtomicBool::new(false)),
            event_tx: None,
        }
    }

    /// Attach a progress event channel.
    pub fn with_events(mut self, tx: crossbeam_channel::Sender<JobEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Shared cancellation flag; set it from another task to abort the job.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    fn emit(&self, event: JobEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.try_send(event);
        }
    }

    /// Run one transcription job from a media reference to a token stream.
    ///
    /// # Errors
    ///
    /// Every failure mode maps to a distinct [`CapstreamError`] variant:
    /// unreachable source, rejected upload or job start, poll transport
    /// failure, provider-reported job error, poll timeout, unmappable
    /// payload, empty result, or cancellation.
    pub async fn transcribe(&self, source_ref: &str) -> Result<Vec<Token>> {
        match self.run(source_ref).await {
            Ok(tokens) => Ok(tokens),
            Err(e) => {
                self.emit(JobEvent::Failed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn run(&self, source_ref: &str) -> Result<Vec<Token>> {
        if self.cancelled() {
            return Err(CapstreamError::Cancelled);
        }

        self.emit(JobEvent::Preparing {
            source_ref: source_ref.to_string(),
        });
        let resolved = resolve_source(source_ref).await?;

        if self.cancelled() {
            return Err(CapstreamError::Cancelled);
        }

        self.emit(JobEvent::Uploading {
            byte_count: resolved.bytes.len(),
        });
        let upload = self.provider.upload(&resolved.bytes).await.map_err(|e| {
            CapstreamError::UploadRejected {
                message: format!("{} (source {})", e.provider_message(), resolved.label),
            }
        })?;

        let job_id = self.provider.start_job(&upload).await.map_err(|e| {
            CapstreamError::JobStartRejected {
                message: format!("{} (source {})", e.provider_message(), resolved.label),
            }
        })?;
        self.emit(JobEvent::JobStarted {
            job_id: job_id.0.clone(),
        });

        let response = self.poll_until_settled(&job_id).await?;
        let tokens = self.map_outcome(&job_id, &resolved.label, response)?;
        if tokens.is_empty() {
            return Err(CapstreamError::EmptyTranscript {
                job_id: job_id.0.clone(),
            });
        }

        self.emit(JobEvent::Completed {
            job_id: job_id.0.clone(),
            token_count: tokens.len(),
        });
        Ok(tokens)
    }

    /// Poll until the job completes, errors, times out, or is cancelled.
    ///
    /// The deadline is checked before each poll, so a zero timeout issues no
    /// polls at all.
    async fn poll_until_settled(&self, job_id: &JobId) -> Result<PollResponse> {
        let started = Instant::now();

        loop {
            if self.cancelled() {
                return Err(CapstreamError::Cancelled);
            }
            if started.elapsed() >= self.poll_timeout {
                return Err(CapstreamError::TimedOut {
                    job_id: job_id.0.clone(),
                    seconds: self.poll_timeout.as_secs(),
                });
            }

            let response = self.provider.poll_job(job_id).await.map_err(|e| {
                CapstreamError::PollFailed {
                    job_id: job_id.0.clone(),
                    message: e.provider_message(),
                }
            })?;
            self.emit(JobEvent::Polling {
                job_id: job_id.0.clone(),
                status: response.status,
            });

            match response.status {
                JobStatus::Completed => return Ok(response),
                JobStatus::Error => {
                    return Err(CapstreamError::ProviderReportedError {
                        job_id: job_id.0.clone(),
                        message: response
                            .error
                            .unwrap_or_else(|| "provider reported failure without detail".to_string()),
                    });
                }
                JobStatus::Queued | JobStatus::Processing => {
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }

    /// Map a completed response into a validated token stream.
    ///
    /// Word-level payloads that produce no tokens fall back to the span form
    /// when one is present.
    fn map_outcome(
        &self,
        job_id: &JobId,
        source_label: &str,
        response: PollResponse,
    ) -> Result<Vec<Token>> {
        let spans = response
            .utterances
            .clone()
            .or_else(|| response.segments.clone());

        match JobOutcome::from_poll(response) {
            JobOutcome::WordLevel {
                words,
                full_text,
                confidence,
            } => {
                let tokens = self.map_word_level(words, full_text.as_deref(), confidence);
                if !tokens.is_empty() {
                    return Ok(tokens);
                }
                match spans {
                    Some(spans) if !spans.is_empty() => Ok(self.tokenizer.tokenize(&spans)),
                    _ => Ok(tokens),
                }
            }
            JobOutcome::SegmentLevel { segments } => Ok(self.tokenizer.tokenize(&segments)),
            JobOutcome::Failed { reason } => Err(CapstreamError::MappingFailed {
                job_id: job_id.0.clone(),
                source_label: source_label.to_string(),
                message: reason,
            }),
        }
    }

    /// Tokenize word-level timestamps, reconciling punctuation from the full
    /// transcript text when the words themselves carry none.
    fn map_word_level(
        &self,
        words: Vec<Word>,
        full_text: Option<&str>,
        confidence: Option<f32>,
    ) -> Vec<Token> {
        let start_ms = words.first().and_then(|w| w.start_ms).unwrap_or(0);
        let end_ms = words.last().and_then(|w| w.end_ms).unwrap_or(start_ms);
        let text = match full_text {
            Some(t) => t.to_string(),
            None => words
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        };

        let segment = Segment {
            words: Some(words),
            confidence,
            ..Segment::text_span(&text, start_ms, end_ms)
        };

        let raw = self.tokenizer.map_segments(std::slice::from_ref(&segment));
        let has_punct = raw.iter().any(|t| t.is_punctuation());

        match full_text {
            Some(full) if !has_punct => {
                let words_only: Vec<Token> = raw.into_iter().filter(|t| t.is_word()).collect();
                self.tokenizer.reconcile(words_only, full)
            }
            _ => validate(raw),
        }
    }
}
