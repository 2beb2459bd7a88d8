//! Title selection.

use crate::detect::classify::round_to_tenths;
use crate::source::TextLine;

/// Fallback title for documents with no usable first-page text.
pub const UNTITLED: &str = "Untitled";

/// Pick the document title from the first page's lines: the line with the
/// strictly largest rounded font size wins; ties go to the line seen first
/// in reading order. Lines shorter than three characters are ignored.
pub fn select_title(first_page: &[TextLine]) -> String {
    let mut best: Option<(i32, &str)> = None;

    for line in first_page {
        let text = line.text.trim();
        if text.chars().count() < 3 {
            continue;
        }
        let size = round_to_tenths(line.font_size);
        if best.map_or(true, |(best_size, _)| size > best_size) {
            best = Some((size, text));
        }
    }

    match best {
        Some((_, text)) => text.to_string(),
        None => UNTITLED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, size: f32) -> TextLine {
        TextLine::new(text, size, "Helvetica", 0)
    }

    #[test]
    fn test_largest_size_wins() {
        let lines = vec![
            line("Small print", 8.0),
            line("Annual Report 2024", 24.0),
            line("Subtitle", 16.0),
        ];
        assert_eq!(select_title(&lines), "Annual Report 2024");
    }

    #[test]
    fn test_tie_goes_to_first_in_reading_order() {
        let lines = vec![line("First Heading", 18.0), line("Second Heading", 18.0)];
        assert_eq!(select_title(&lines), "First Heading");
    }

    #[test]
    fn test_rounded_sizes_compare_equal() {
        // 18.04 and 18.01 both round to 18.0: first wins
        let lines = vec![line("First", 18.04), line("Second", 18.01)];
        assert_eq!(select_title(&lines), "First");
    }

    #[test]
    fn test_empty_page_is_untitled() {
        assert_eq!(select_title(&[]), UNTITLED);
    }

    #[test]
    fn test_short_lines_are_ignored() {
        let lines = vec![line("A", 30.0), line("Real Title", 20.0)];
        assert_eq!(select_title(&lines), "Real Title");

        let only_short = vec![line("Hi", 30.0)];
        assert_eq!(select_title(&only_short), UNTITLED);
    }
}
