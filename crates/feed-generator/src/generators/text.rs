//! Corpus-based string extraction.
//!
//! Strings are human-readable fragments cut out of the loaded corpus:
//! pick a random start offset biased slightly away from the tail,
//! advance to the next word boundary, take 1-10 boundary-delimited
//! tokens, and replace newlines and punctuation with spaces.

use crate::corpus::Corpus;
use rand::Rng;

/// Characters replaced by a space in extracted fragments.
const STRIPPED: &[char] = &['\n', '\r', ',', ':', '"', '\'', '!', '(', ')', '?', '.'];

/// Extract a random fragment from the corpus.
///
/// Non-empty for any corpus of reasonable length; corpora without a
/// single word boundary fall back to the whole stripped text.
pub fn extract_fragment<R: Rng>(corpus: &Corpus, rng: &mut R) -> String {
    let len = corpus.len();

    for _ in 0..8 {
        let tail_bias = (128.0 * rng.gen::<f64>()) as usize;
        let upper = len.saturating_sub(tail_bias).max(1);
        let start = rng.gen_range(0..upper);
        let words = rng.gen_range(1..=10);

        let fragment = extract_at(corpus.text(), start, words);
        if !fragment.trim().is_empty() {
            return fragment;
        }
    }

    strip_punctuation(corpus.text())
}

/// Extract up to `words` tokens starting at the first word boundary at
/// or after `start` (a byte offset).
///
/// Boundaries are ASCII space and period, so every computed offset
/// lands on a UTF-8 character boundary even when `start` does not.
fn extract_at(text: &str, start: usize, words: usize) -> String {
    let bytes = text.as_bytes();
    let len = bytes.len();

    let mut start = start.min(len);
    while start < len && !is_boundary(bytes[start]) {
        start += 1;
    }
    start = (start + 1).min(len);

    let mut end = (start + 1).min(len);
    for _ in 0..words {
        while end < len && !is_boundary(bytes[end]) {
            end += 1;
        }
        end = (end + 1).min(len);
    }

    strip_punctuation(&text[start..end])
}

fn is_boundary(byte: u8) -> bool {
    byte == b' ' || byte == b'.'
}

fn strip_punctuation(fragment: &str) -> String {
    fragment
        .chars()
        .map(|c| if STRIPPED.contains(&c) { ' ' } else { c })
        .collect()
}
