//! Heading classification.
//!
//! Decides whether a normalized line is a heading candidate. The predicate
//! is a disjunction of independent visual heuristics: a numbered-heading
//! pattern, a bold font name, a large font size, or a trailing colon.

use regex::Regex;

use crate::source::TextLine;
use crate::translate::Translate;

/// Font size threshold (in tenths of a point) above which a line is a
/// candidate on size alone.
pub const LARGE_SIZE_TENTHS: i32 = 120;

/// A line judged plausible as a structural heading.
///
/// Font size is carried in tenths of a point so that later frequency
/// grouping compares exact values.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Candidate text (normalized, possibly translated)
    pub text: String,

    /// Font size rounded to one decimal, in tenths of a point
    pub size_tenths: i32,

    /// Font name as captured from the line
    pub font_name: String,

    /// Page number (1-indexed)
    pub page: usize,
}

impl HeadingCandidate {
    /// Font size in points, rounded to one decimal.
    pub fn font_size(&self) -> f32 {
        self.size_tenths as f32 / 10.0
    }
}

/// Heading classifier with its compiled numbering pattern.
pub struct HeadingClassifier {
    numbered: Regex,
}

impl HeadingClassifier {
    pub fn new() -> Self {
        Self {
            // Optional "(", letters/digits, optional ")" or ".", whitespace,
            // then an uppercase letter: "1. Introduction", "(a) Overview",
            // "IV Summary".
            numbered: Regex::new(r"^\(?[0-9a-zA-Z]+\)?[.)]?\s+[A-Z]").unwrap(),
        }
    }

    /// Classify a normalized line; emit a candidate if any heuristic fires.
    ///
    /// On acceptance the text is passed through the translator; any
    /// translation failure falls back to the untranslated text.
    pub fn classify(
        &self,
        line: &TextLine,
        normalized: &str,
        translator: &dyn Translate,
    ) -> Option<HeadingCandidate> {
        let size_tenths = round_to_tenths(line.font_size);

        let is_numbered = self.numbered.is_match(normalized);
        let is_bold = line.font_name.to_lowercase().contains("bold");
        let is_large = size_tenths >= LARGE_SIZE_TENTHS;
        let has_colon = normalized.ends_with(':');

        if !(is_numbered || is_bold || is_large || has_colon) {
            return None;
        }

        let text = match translator.translate(normalized) {
            Ok(t) if !t.trim().is_empty() => t,
            Ok(_) => normalized.to_string(),
            Err(e) => {
                log::debug!("translation fallback for {:?}: {}", normalized, e);
                normalized.to_string()
            }
        };

        Some(HeadingCandidate {
            text,
            size_tenths,
            font_name: line.font_name.clone(),
            page: line.page_index + 1,
        })
    }
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Round a font size to one decimal, expressed in tenths of a point.
pub fn round_to_tenths(size: f32) -> i32 {
    (size * 10.0).round() as i32
}
