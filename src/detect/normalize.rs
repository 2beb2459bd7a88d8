//! Line normalization and candidate filtering.
//!
//! Turns raw line text into a clean candidate string, or rejects it.
//! Rejection covers trivial lines (too short, no letters, entirely
//! lowercase), the document title, and texts already seen earlier in the
//! same document.

use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

/// Per-document line normalizer.
///
/// Holds the title exclusion and the first-seen-wins de-duplication set.
/// State is scoped to one document's processing; nothing is shared across
/// documents.
pub struct LineNormalizer {
    title_lower: String,
    seen: HashSet<String>,
}

impl LineNormalizer {
    /// Create a normalizer for a document with the given title.
    pub fn new(title: &str) -> Self {
        Self {
            title_lower: title.to_lowercase(),
            seen: HashSet::new(),
        }
    }

    /// Normalize one raw line, or reject it.
    ///
    /// Accepted texts are recorded: the same normalized text is never
    /// accepted twice in one document, regardless of page.
    pub fn normalize(&mut self, raw: &str) -> Option<String> {
        let text = collapse_whitespace(&raw.nfc().collect::<String>());

        if text.chars().count() < 3 {
            return None;
        }
        if is_entirely_lowercase(&text) {
            return None;
        }
        if !text.chars().any(|c| c.is_alphabetic()) {
            return None;
        }
        if text.to_lowercase() == self.title_lower {
            return None;
        }
        if !self.seen.insert(text.clone()) {
            return None;
        }

        Some(text)
    }
}

/// Collapse whitespace runs to single spaces and trim.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when the string has at least one cased letter and no uppercase one.
/// A string with no letters at all is not "lowercase".
fn is_entirely_lowercase(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            return false;
        }
        if c.is_lowercase() {
            has_cased = true;
        }
    }
    has_cased
}
