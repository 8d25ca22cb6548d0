//! Text processing utilities.
//!
//! Provides the word normalization and sentence splitting the analyzer builds
//! on. Both are deliberately coarse: sentences end at any run of `.`, `!` or
//! `?`, and words are whatever remains between whitespace once punctuation is
//! stripped.

use regex::Regex;
use std::sync::LazyLock;

/// Characters that are neither ASCII word characters nor whitespace.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("valid regex"));

/// Runs of sentence-terminal punctuation.
static SENTENCE_TERMINATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Lowercase `text`, strip punctuation, and split it into words.
///
/// Non-ASCII letters are stripped along with punctuation, so "café" becomes
/// "caf".
pub fn normalized_words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    NON_WORD
        .replace_all(&lower, "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Split `text` at runs of `.`, `!` or `?` and trim each piece.
///
/// Empty pieces are kept; callers filter on length.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_TERMINATORS.split(text).map(str::trim).collect()
}

/// Length of `s` in characters rather than bytes.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Uppercase the first character of `word`.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
