//! Final ordering and validation pass over a candidate token stream.

use crate::defaults;
use crate::token::{Token, TokenKind};

/// Normalize a candidate token list into a finalized stream.
///
/// Drops word tokens whose trimmed text is empty, stable-sorts by
/// `(start_ms, end_ms, word-before-punctuation)`, re-assigns dense indices,
/// and normalizes confidence into `[0, 1]` (non-finite values fall back to
/// the default). Idempotent: validating twice yields the same stream.
pub fn validate(mut tokens: Vec<Token>) -> Vec<Token> {
    tokens.retain(|t| !t.text.trim().is_empty() || t.kind == TokenKind::Punctuation);

    tokens.sort_by(|a, b| {
        a.start_ms
            .cmp(&b.start_ms)
            .then(a.end_ms.cmp(&b.end_ms))
            .then(a.kind.rank().cmp(&b.kind.rank()))
    });

    for (i, token) in tokens.iter_mut().enumerate() {
        token.index = i;
        if !token.confidence.is_finite() {
            token.confidence = defaults::DEFAULT_CONFIDENCE;
        } else {
            token.confidence = token.confidence.clamp(0.0, 1.0);
        }
    }

    tokens
}
