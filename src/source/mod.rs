//! Text line sources.
//!
//! The outline pipeline consumes an ordered stream of text lines annotated
//! with font metrics. [`LineSource`] isolates where those lines come from:
//! the shipped implementation reads PDF content streams via `lopdf`
//! ([`PdfLineSource`]), and tests supply in-memory sources.

pub mod pdf;

pub use pdf::PdfLineSource;

use crate::error::Result;

/// A single physical text line with its font metrics.
///
/// Produced once per line by the source; immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Raw line text (span texts joined with spaces)
    pub text: String,

    /// Average font size across the spans of the line, in points
    pub font_size: f32,

    /// Primary font name (first span), e.g. "Helvetica-Bold"
    pub font_name: String,

    /// Page index (0-based)
    pub page_index: usize,
}

impl TextLine {
    /// Create a new text line.
    pub fn new(
        text: impl Into<String>,
        font_size: f32,
        font_name: impl Into<String>,
        page_index: usize,
    ) -> Self {
        Self {
            text: text.into(),
            font_size,
            font_name: font_name.into(),
            page_index,
        }
    }
}

/// Abstract interface for per-page line access.
///
/// Implementations yield lines in reading order (top to bottom, then left
/// to right) and pages in ascending order. All returned data is a read-only
/// snapshot, so documents can be processed independently and in parallel.
pub trait LineSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Ordered text lines of one page (0-based index).
    fn lines(&self, page_index: usize) -> Result<Vec<TextLine>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_line_new() {
        let line = TextLine::new("Hello", 12.5, "Helvetica", 0);
        assert_eq!(line.text, "Hello");
        assert_eq!(line.font_size, 12.5);
        assert_eq!(line.font_name, "Helvetica");
        assert_eq!(line.page_index, 0);
    }
}
