//! Transcript tokenization: raw segments in, finalized token stream out.
//!
//! The pipeline is allocator → (optional reconciler) → validator; see the
//! submodules for each pass. Everything here is pure and synchronous.

pub mod allocate;
pub mod emphasis;
pub mod reconcile;
pub mod scanner;
pub mod validate;

use crate::config::TimingConfig;
use crate::defaults;
use crate::token::{Segment, Token};

pub use validate::validate;

/// Tokenizer with explicit timing parameters.
///
/// The free functions [`tokenize`] and [`parse_transcript_text`] cover the
/// common case with default tuning.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    timing: TimingConfig,
}

impl Tokenizer {
    pub fn new(timing: TimingConfig) -> Self {
        Self { timing }
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Convert raw segments into a finalized, validated token stream.
    ///
    /// Segments carrying word entries are tokenized word by word with each
    /// word's own window; segments without words are tokenized as one span.
    /// Blank segments are skipped.
    pub fn tokenize(&self, segments: &[Segment]) -> Vec<Token> {
        validate::validate(self.map_segments(segments))
    }

    /// Tokenize a bare text span over an explicit window.
    pub fn parse_text(
        &self,
        text: &str,
        start_ms: u64,
        end_ms: u64,
        confidence: f32,
    ) -> Vec<Token> {
        validate::validate(allocate::allocate_span(
            text,
            start_ms,
            end_ms,
            confidence,
            0,
            &self.timing,
        ))
    }

    /// Re-insert punctuation from full transcript text into a word-only
    /// stream, then validate. See [`reconcile::reconcile`].
    pub fn reconcile(&self, words_only: Vec<Token>, full_text: &str) -> Vec<Token> {
        validate::validate(reconcile::reconcile(words_only, full_text, &self.timing))
    }

    /// Segment mapping without the final validation pass.
    ///
    /// The orchestrator uses this to inspect the raw allocator output (for
    /// punctuation presence) before deciding whether to reconcile.
    pub(crate) fn map_segments(&self, segments: &[Segment]) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut index = 0usize;

        for segment in segments {
            let segment_confidence = segment
                .confidence
                .unwrap_or(self.timing.default_confidence);

            if let Some(words) = &segment.words
                && !words.is_empty()
            {
                for word in words {
                    let word_start = word.start_ms.unwrap_or(segment.start_ms);
                    let word_end = word.end_ms.unwrap_or_else(|| {
                        (word_start + self.timing.word_fallback_span_ms).max(segment.end_ms)
                    });
                    let confidence = word.confidence.unwrap_or(segment_confidence);

                    let word_tokens = allocate::allocate_span(
                        &word.text,
                        word_start,
                        word_end,
                        confidence,
                        index,
                        &self.timing,
                    );
                    index += word_tokens.len();
                    tokens.extend(word_tokens);
                }
                continue;
            }

            if segment.text.trim().is_empty() {
                continue;
            }

            let segment_tokens = allocate::allocate_span(
                &segment.text,
                segment.start_ms,
                segment.end_ms,
                segment_confidence,
                index,
                &self.timing,
            );
            index += segment_tokens.len();
            tokens.extend(segment_tokens);
        }

        tokens
    }
}

/// Convert raw segments into a finalized token stream with default tuning.
pub fn tokenize(segments: &[Segment]) -> Vec<Token> {
    Tokenizer::default().tokenize(segments)
}

/// Tokenize bare transcript text over a default 30-second window.
///
/// Useful for previews where no real duration is known yet.
pub fn parse_transcript_text(text: &str) -> Vec<Token> {
    Tokenizer::default().parse_text(
        text,
        0,
        defaults::PARSE_TEXT_WINDOW_MS,
        defaults::DEFAULT_CONFIDENCE,
    )
}
