//! Playhead-driven queries a renderer calls every frame.
//!
//! All functions here are pure and allocation-free; they are designed for
//! per-animation-frame invocation and impose no scheduling of their own.

use crate::defaults;
use crate::sentence::SentenceGroup;
use crate::token::{Token, TokenKind};

/// How the renderer is displaying the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Full transcript with per-token reveal.
    #[default]
    Default,
    /// Large headline typography, full transcript.
    Headline,
    /// Caption strip: only the active sentence is visible.
    Caption,
}

/// The sentence the playhead is currently inside, with a custom grace window.
///
/// Picks the first sentence whose window (extended by `grace_ms`) contains
/// the playhead; failing that, the last sentence that has already started;
/// failing that, the first sentence. Returns `None` only for an empty list.
pub fn active_sentence_with_grace(
    sentences: &[SentenceGroup],
    playhead_ms: u64,
    grace_ms: u64,
) -> Option<&SentenceGroup> {
    if sentences.is_empty() {
        return None;
    }

    if let Some(hit) = sentences
        .iter()
        .find(|s| s.start_ms <= playhead_ms && playhead_ms <= s.end_ms + grace_ms)
    {
        return Some(hit);
    }

    sentences
        .iter()
        .filter(|s| s.start_ms <= playhead_ms)
        .next_back()
        .or_else(|| sentences.first())
}

/// The sentence the playhead is currently inside, with the default grace.
pub fn active_sentence(sentences: &[SentenceGroup], playhead_ms: u64) -> Option<&SentenceGroup> {
    active_sentence_with_grace(sentences, playhead_ms, defaults::SENTENCE_GRACE_MS)
}

/// The tokens a renderer should lay out at this playhead position.
///
/// Caption mode shows exactly the active sentence's slice; every other mode
/// lays out the whole stream and handles per-token pending state itself
/// (see [`token_visible`]).
pub fn visible_tokens<'a>(
    tokens: &'a [Token],
    sentences: &[SentenceGroup],
    playhead_ms: u64,
    mode: DisplayMode,
) -> &'a [Token] {
    if mode != DisplayMode::Caption {
        return tokens;
    }
    match active_sentence(sentences, playhead_ms) {
        Some(sentence) => sentence.slice(tokens),
        None => &[],
    }
}

/// Whether a token has been reached by the playhead.
///
/// Tokens not yet reached render in a muted/pending state; that styling is
/// the renderer's concern, this is just the reveal condition.
pub fn token_visible(token: &Token, playhead_ms: u64) -> bool {
    playhead_ms >= token.start_ms
}

/// The short rotating hook line for this playhead position.
///
/// Candidates are the first six distinct short sentences (1–4 words); when
/// none exist, the first six distinct words of length ≤ 8 reached within the
/// stream's first matches. The playhead selects a candidate on a fixed
/// rotation period. Returns `None` when no candidate exists.
pub fn rotating_hook<'a>(
    sentences: &'a [SentenceGroup],
    tokens: &'a [Token],
    playhead_ms: u64,
) -> Option<&'a str> {
    rotating_hook_with_interval(sentences, tokens, playhead_ms, defaults::HOOK_ROTATE_INTERVAL_MS)
}

/// [`rotating_hook`] with a custom rotation period.
pub fn rotating_hook_with_interval<'a>(
    sentences: &'a [SentenceGroup],
    tokens: &'a [Token],
    playhead_ms: u64,
    interval_ms: u64,
) -> Option<&'a str> {
    let mut hooks: [&str; defaults::HOOK_CAPACITY] = [""; defaults::HOOK_CAPACITY];
    let mut count = 0usize;

    for sentence in sentences {
        if count == hooks.len() {
            break;
        }
        if sentence.word_count == 0 || sentence.word_count > defaults::HOOK_MAX_SENTENCE_WORDS {
            continue;
        }
        if !hooks[..count].contains(&sentence.text.as_str()) {
            hooks[count] = &sentence.text;
            count += 1;
        }
    }

    if count == 0 {
        // Fall back to short words: scan the first six matches, deduplicated.
        let mut scanned = 0usize;
        for token in tokens {
            if scanned == hooks.len() {
                break;
            }
            if token.kind != TokenKind::Word || token.text.len() > defaults::HOOK_MAX_WORD_LEN {
                continue;
            }
            scanned += 1;
            if !hooks[..count].contains(&token.text.as_str()) {
                hooks[count] = &token.text;
                count += 1;
            }
        }
    }

    if count == 0 {
        return None;
    }

    let slot = (playhead_ms / interval_ms.max(1)) as usize % count;
    Some(hooks[slot])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::group_sentences;
    use crate::token::Segment;
    use crate::tokenize::tokenize;

    fn stream(text: &str, end_ms: u64) -> (Vec<Token>, Vec<SentenceGroup>) {
        let tokens = tokenize(&[Segment::text_span(text, 0, end_ms)]);
        let sentences = group_sentences(&tokens);
        (tokens, sentences)
    }

    fn sentence(start_ms: u64, end_ms: u64, text: &str, word_count: usize) -> SentenceGroup {
        SentenceGroup {
            tokens: 0..0,
            text: text.to_string(),
            start_ms,
            end_ms,
            word_count,
        }
    }

    #[test]
    fn test_active_sentence_inside_window() {
        let sentences = vec![sentence(0, 1000, "a.", 1), sentence(1200, 2000, "b.", 1)];
        let active = active_sentence(&sentences, 500).unwrap();
        assert_eq!(active.text, "a.");
    }

    #[test]
    fn test_active_sentence_grace_period() {
        let sentences = vec![sentence(0, 1000, "a.", 1), sentence(1200, 2000, "b.", 1)];
        // 1000 < 1150 <= 1000 + 400 grace, and the second has not started yet
        // in window terms, so the first sentence still wins via grace.
        let active = active_sentence(&sentences, 1150).unwrap();
        assert_eq!(active.text, "a.");
    }

    #[test]
    fn test_active_sentence_falls_back_to_last_started() {
        let sentences = vec![sentence(0, 1000, "a.", 1), sentence(1200, 2000, "b.", 1)];
        let active = active_sentence(&sentences, 5000).unwrap();
        assert_eq!(active.text, "b.");
    }

    #[test]
    fn test_active_sentence_before_first_start_returns_first() {
        let sentences = vec![sentence(500, 1000, "a.", 1), sentence(1200, 2000, "b.", 1)];
        let active = active_sentence(&sentences, 100).unwrap();
        assert_eq!(active.text, "a.");
    }

    #[test]
    fn test_active_sentence_none_only_when_empty() {
        assert!(active_sentence(&[], 0).is_none());
    }

    #[test]
    fn test_custom_grace_window() {
        let sentences = vec![sentence(0, 1000, "a.", 1), sentence(3000, 4000, "b.", 1)];
        assert_eq!(active_sentence_with_grace(&sentences, 1400, 500).unwrap().text, "a.");
        // Without grace the first window has closed; last-started fallback applies
        assert_eq!(active_sentence_with_grace(&sentences, 1400, 0).unwrap().text, "a.");
    }

    #[test]
    fn test_visible_tokens_caption_mode_is_active_slice() {
        let (tokens, sentences) = stream("Hi there. Go now!", 4000);
        let visible = visible_tokens(&tokens, &sentences, 0, DisplayMode::Caption);
        assert_eq!(visible.len(), sentences[0].tokens.len());
        assert_eq!(visible[0].text, "Hi");
    }

    #[test]
    fn test_visible_tokens_other_modes_return_full_stream() {
        let (tokens, sentences) = stream("Hi there. Go now!", 4000);
        for mode in [DisplayMode::Default, DisplayMode::Headline] {
            let visible = visible_tokens(&tokens, &sentences, 0, mode);
            assert_eq!(visible.len(), tokens.len());
        }
    }

    #[test]
    fn test_visible_tokens_empty_stream() {
        let visible = visible_tokens(&[], &[], 100, DisplayMode::Caption);
        assert!(visible.is_empty());
    }

    #[test]
    fn test_token_visible_reveal_condition() {
        let (tokens, _) = stream("one two three", 3000);
        assert!(token_visible(&tokens[0], 0));
        assert!(!token_visible(&tokens[2], tokens[2].start_ms - 1));
        assert!(token_visible(&tokens[2], tokens[2].start_ms));
    }

    #[test]
    fn test_rotating_hook_prefers_short_sentences() {
        let sentences = vec![
            sentence(0, 1000, "Stay sharp.", 2),
            sentence(1000, 9000, "This sentence is much too long to be a hook honestly.", 11),
            sentence(9000, 9500, "Go!", 1),
        ];
        let hook = rotating_hook(&sentences, &[], 0).unwrap();
        assert_eq!(hook, "Stay sharp.");
        // Next rotation slot picks the other short sentence
        let hook = rotating_hook(&sentences, &[], 1700).unwrap();
        assert_eq!(hook, "Go!");
        // And wraps around
        let hook = rotating_hook(&sentences, &[], 3400).unwrap();
        assert_eq!(hook, "Stay sharp.");
    }

    #[test]
    fn test_rotating_hook_deduplicates_sentences() {
        let sentences = vec![
            sentence(0, 500, "Go!", 1),
            sentence(500, 1000, "Go!", 1),
            sentence(1000, 1500, "Run!", 1),
        ];
        // Two distinct hooks: slots alternate between them
        assert_eq!(rotating_hook(&sentences, &[], 0).unwrap(), "Go!");
        assert_eq!(rotating_hook(&sentences, &[], 1700).unwrap(), "Run!");
        assert_eq!(rotating_hook(&sentences, &[], 3400).unwrap(), "Go!");
    }

    #[test]
    fn test_rotating_hook_falls_back_to_short_words() {
        let (tokens, _) = stream(
            "absolutely tremendous extraordinary unbelievable circumstances considering go",
            7000,
        );
        // No sentences provided; only "go" is <= 8 chars
        let hook = rotating_hook(&[], &tokens, 0).unwrap();
        assert_eq!(hook, "go");
    }

    #[test]
    fn test_rotating_hook_none_when_no_candidates() {
        assert!(rotating_hook(&[], &[], 0).is_none());

        let (tokens, _) = stream("absolutely tremendous", 2000);
        assert!(rotating_hook(&[], &tokens, 0).is_none());
    }

    #[test]
    fn test_rotating_hook_caps_at_six_candidates() {
        let sentences: Vec<_> = (0..10)
            .map(|i| sentence(i * 100, i * 100 + 90, &format!("Hook {i}!"), 2))
            .collect();
        // Slot 6 wraps back to the first of the six retained candidates
        let at_slot_zero = rotating_hook(&sentences, &[], 0).unwrap();
        let wrapped = rotating_hook(&sentences, &[], 6 * 1700).unwrap();
        assert_eq!(at_slot_zero, wrapped);
        assert_eq!(at_slot_zero, "Hook 0!");
    }
}
