//! Outline inference pipeline.
//!
//! Stages, in order: title selection from the first page, line
//! normalization, heading classification, and frequency-based level
//! assignment. [`build_outline`] orchestrates them for one document and
//! holds no heading logic of its own.

pub mod classify;
pub mod levels;
pub mod normalize;
pub mod title;

pub use classify::{HeadingCandidate, HeadingClassifier};
pub use normalize::LineNormalizer;

use crate::error::Result;
use crate::model::DocumentOutline;
use crate::source::LineSource;
use crate::translate::Translate;

/// Build the outline for one document.
///
/// Purely computational and single-threaded; all intermediate state is
/// scoped to this call, so separate documents can be processed in parallel
/// with no coordination.
pub fn build_outline<S: LineSource + ?Sized>(
    source: &S,
    translator: &dyn Translate,
) -> Result<DocumentOutline> {
    let page_count = source.page_count();
    let mut first_page = if page_count > 0 {
        source.lines(0)?
    } else {
        Vec::new()
    };

    // The title must be known before classification: it is excluded from
    // the candidate set.
    let title = title::select_title(&first_page);

    let classifier = HeadingClassifier::new();
    let mut normalizer = LineNormalizer::new(&title);
    let mut candidates = Vec::new();

    for page_index in 0..page_count {
        let lines = if page_index == 0 {
            std::mem::take(&mut first_page)
        } else {
            source.lines(page_index)?
        };

        for line in &lines {
            let Some(normalized) = normalizer.normalize(&line.text) else {
                continue;
            };
            if let Some(candidate) = classifier.classify(line, &normalized, translator) {
                candidates.push(candidate);
            }
        }
    }

    log::debug!(
        "{} heading candidates across {} pages",
        candidates.len(),
        page_count
    );

    let outline = levels::assign_levels(&candidates);
    Ok(DocumentOutline { title, outline })
}
