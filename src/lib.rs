//! # pdf-outliner
//!
//! Infers a logical document outline (title plus H1-H3 headings with page
//! numbers) from the raw layout of a PDF, using only visual and typographic
//! signals: font size, boldness, numbering patterns, and line position.
//! Built for pipelines that need a navigable table of contents from
//! documents lacking one natively.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outliner::{outline_file, to_json, JsonFormat};
//!
//! fn main() -> pdf_outliner::Result<()> {
//!     let outline = outline_file("document.pdf")?;
//!     println!("{}", outline.title);
//!     println!("{}", to_json(&outline, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## How it works
//!
//! - **Line normalization**: whitespace collapsing and triviality filtering
//! - **Heading classification**: numbering patterns, bold fonts, large
//!   sizes, trailing colons
//! - **Title selection**: the largest line on the first page
//! - **Level assignment**: the three most frequent candidate font sizes
//!   become H1-H3, largest first
//!
//! Heading text can optionally be machine-translated through an injected
//! [`Translate`] capability; failures always fall back to the original
//! text.

pub mod detect;
pub mod error;
pub mod json;
pub mod model;
pub mod source;
pub mod translate;

// Re-export commonly used types
pub use detect::{build_outline, HeadingCandidate, HeadingClassifier, LineNormalizer};
pub use error::{Error, Result};
pub use json::{to_json, JsonFormat};
pub use model::{DocumentOutline, HeadingLevel, LeveledHeading};
pub use source::{LineSource, PdfLineSource, TextLine};
pub use translate::{CommandTranslator, NoopTranslator, Translate};

use std::path::Path;

/// Infer the outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// let outline = pdf_outliner::outline_file("document.pdf").unwrap();
/// for heading in &outline.outline {
///     println!("{} {} (p. {})", heading.level, heading.text, heading.page);
/// }
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    let source = PdfLineSource::open(path)?;
    build_outline(&source, &NoopTranslator)
}

/// Infer the outline of a PDF held in memory.
pub fn outline_bytes(data: &[u8]) -> Result<DocumentOutline> {
    let source = PdfLineSource::from_bytes(data)?;
    build_outline(&source, &NoopTranslator)
}

/// Builder for outline extraction with an injected translator.
///
/// # Example
///
/// ```no_run
/// use pdf_outliner::{CommandTranslator, Outliner};
///
/// let outline = Outliner::new()
///     .with_translator(CommandTranslator::apertium("ja-en"))
///     .outline_file("document.pdf")?;
/// # Ok::<(), pdf_outliner::Error>(())
/// ```
pub struct Outliner {
    translator: Box<dyn Translate>,
}

impl Outliner {
    /// Create an outliner with the identity translator.
    pub fn new() -> Self {
        Self {
            translator: Box::new(NoopTranslator),
        }
    }

    /// Set the translation capability applied to heading text.
    pub fn with_translator(mut self, translator: impl Translate + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    /// Infer the outline of a PDF file.
    pub fn outline_file<P: AsRef<Path>>(&self, path: P) -> Result<DocumentOutline> {
        let source = PdfLineSource::open(path)?;
        build_outline(&source, self.translator.as_ref())
    }

    /// Infer the outline of a PDF held in memory.
    pub fn outline_bytes(&self, data: &[u8]) -> Result<DocumentOutline> {
        let source = PdfLineSource::from_bytes(data)?;
        build_outline(&source, self.translator.as_ref())
    }

    /// Infer the outline from any line source.
    pub fn outline_source(&self, source: &dyn LineSource) -> Result<DocumentOutline> {
        build_outline(source, self.translator.as_ref())
    }
}

impl Default for Outliner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_bytes_rejects_non_pdf() {
        let result = outline_bytes(b"definitely not a pdf");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_outliner_source_with_empty_document() {
        struct Empty;
        impl LineSource for Empty {
            fn page_count(&self) -> usize {
                0
            }
            fn lines(&self, _page_index: usize) -> Result<Vec<TextLine>> {
                Ok(Vec::new())
            }
        }

        let outline = Outliner::new().outline_source(&Empty).unwrap();
        assert_eq!(outline.title, "Untitled");
        assert!(outline.is_empty());
    }
}
