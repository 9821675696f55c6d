//! Core data types: tokens and the raw transcript spans they come from.

use crate::defaults;
use serde::{Deserialize, Serialize};

/// What a token displays as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// A word (alphanumeric run, possibly with an internal apostrophe).
    Word,
    /// A single punctuation character from `. , ! ? ; :`.
    #[serde(rename = "punct")]
    Punctuation,
}

impl TokenKind {
    /// Sort rank at equal timestamps: words render before punctuation.
    pub(crate) fn rank(self) -> u8 {
        match self {
            TokenKind::Word => 0,
            TokenKind::Punctuation => 1,
        }
    }
}

/// Visual-weight tag attached to word tokens for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    #[default]
    None,
    High,
}

fn default_confidence() -> f32 {
    defaults::DEFAULT_CONFIDENCE
}

/// The atomic display unit: one timed word or punctuation mark.
///
/// A finalized token stream is sorted by `(start_ms, end_ms, word-before-
/// punctuation)` and `index` is dense and strictly increasing with stream
/// position. [`crate::tokenize::validate`] establishes both properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
    pub kind: TokenKind,
    #[serde(default)]
    pub emphasis: Emphasis,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
    #[serde(default)]
    pub index: usize,
}

impl Token {
    /// Returns true for word tokens.
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    /// Returns true for punctuation tokens.
    pub fn is_punctuation(&self) -> bool {
        self.kind == TokenKind::Punctuation
    }

    /// Returns true for terminal punctuation (`.`, `!`, `?`).
    pub fn ends_sentence(&self) -> bool {
        self.kind == TokenKind::Punctuation && matches!(self.text.as_str(), "." | "!" | "?")
    }
}

/// One word entry inside a [`Segment`], as delivered by the provider.
///
/// Timestamps are optional because some providers omit them for individual
/// words; the tokenizer falls back to the enclosing segment's window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    #[serde(default, alias = "start")]
    pub start_ms: Option<u64>,
    #[serde(default, alias = "end")]
    pub end_ms: Option<u64>,
    #[serde(default)]
    pub confidence: Option<f32>,
}

/// One raw unit of transcript input: a sentence, an utterance, or an
/// artificial wrapper around a whole transcript.
///
/// Segments are transient; they are consumed to produce [`Token`]s and not
/// retained afterwards. `speaker` is a passthrough label only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub text: String,
    #[serde(default, alias = "start")]
    pub start_ms: u64,
    #[serde(default, alias = "end")]
    pub end_ms: u64,
    #[serde(default)]
    pub confidence: Option<f32>,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub words: Option<Vec<Word>>,
}

impl Segment {
    /// Convenience constructor for a plain text span.
    pub fn text_span(text: impl Into<String>, start_ms: u64, end_ms: u64) -> Self {
        Self {
            text: text.into(),
            start_ms,
            end_ms,
            ..Self::default()
        }
    }
}
