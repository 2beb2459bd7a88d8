//! Outline model types.

use serde::{Deserialize, Serialize};

/// Heading rank within an inferred outline.
///
/// Only the three most frequent font sizes among heading candidates ever
/// receive a level; everything else is dropped from the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Level name as it appears in serialized output ("H1", "H2", "H3").
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }

    /// Level for a rank position among the top heading tiers (0 = H1).
    pub fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(HeadingLevel::H1),
            1 => Some(HeadingLevel::H2),
            2 => Some(HeadingLevel::H3),
            _ => None,
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry of an inferred outline.
///
/// Uniquely keyed by `(text, page)` within one document's outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeveledHeading {
    /// Heading rank (H1-H3)
    pub level: HeadingLevel,

    /// Heading text (normalized, possibly translated)
    pub text: String,

    /// Page number (1-indexed)
    pub page: usize,
}

/// The inferred logical structure of one document: a best-guess title plus
/// a leveled outline in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title (never empty; "Untitled" when the first page has no text)
    pub title: String,

    /// Outline entries in document order (ascending page, then encounter order)
    pub outline: Vec<LeveledHeading>,
}

impl DocumentOutline {
    /// Create an outline with a title and no entries.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outline: Vec::new(),
        }
    }

    /// Check if the outline has no entries.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Number of outline entries.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Entries at a given level, in document order.
    pub fn at_level(&self, level: HeadingLevel) -> impl Iterator<Item = &LeveledHeading> {
        self.outline.iter().filter(move |h| h.level == level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(HeadingLevel::H1.as_str(), "H1");
        assert_eq!(HeadingLevel::H3.to_string(), "H3");
    }

    #[test]
    fn test_level_from_rank() {
        assert_eq!(HeadingLevel::from_rank(0), Some(HeadingLevel::H1));
        assert_eq!(HeadingLevel::from_rank(2), Some(HeadingLevel::H3));
        assert_eq!(HeadingLevel::from_rank(3), None);
    }

    #[test]
    fn test_level_ordering() {
        assert!(HeadingLevel::H1 < HeadingLevel::H2);
        assert!(HeadingLevel::H2 < HeadingLevel::H3);
    }

    #[test]
    fn test_level_serde_names() {
        let json = serde_json::to_string(&HeadingLevel::H2).unwrap();
        assert_eq!(json, "\"H2\"");

        let level: HeadingLevel = serde_json::from_str("\"H1\"").unwrap();
        assert_eq!(level, HeadingLevel::H1);
    }

    #[test]
    fn test_outline_helpers() {
        let mut outline = DocumentOutline::new("Report");
        assert!(outline.is_empty());

        outline.outline.push(LeveledHeading {
            level: HeadingLevel::H1,
            text: "Chapter 1".to_string(),
            page: 1,
        });
        outline.outline.push(LeveledHeading {
            level: HeadingLevel::H2,
            text: "Background".to_string(),
            page: 2,
        });

        assert_eq!(outline.len(), 2);
        assert_eq!(outline.at_level(HeadingLevel::H1).count(), 1);
        assert_eq!(outline.at_level(HeadingLevel::H3).count(), 0);
    }
}
