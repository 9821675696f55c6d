//! capstream - Speech transcripts to timed caption tokens
//!
//! Turns provider transcription payloads into a finalized stream of timed
//! word and punctuation tokens, groups them into sentences, and answers the
//! playhead queries a caption renderer asks every frame.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod orchestrator;
pub mod playhead;
pub mod provider;
pub mod sentence;
pub mod source;
pub mod token;
pub mod tokenize;

// Core data model
pub use sentence::{SentenceGroup, group_sentences};
pub use token::{Emphasis, Segment, Token, TokenKind, Word};

// Tokenization pipeline
pub use tokenize::{Tokenizer, parse_transcript_text, tokenize};

// Playhead queries
pub use playhead::{DisplayMode, active_sentence, rotating_hook, token_visible, visible_tokens};

// Job orchestration
pub use orchestrator::{JobEvent, JobOutcome, Orchestrator};
pub use provider::{MockProvider, TranscriptionProvider};

// Error handling
pub use error::{CapstreamError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
