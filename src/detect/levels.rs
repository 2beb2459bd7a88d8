//! Heading level assignment.
//!
//! Maps a document's heading candidates onto H1-H3 by font-size frequency.
//! The three most frequent sizes are taken as the heading tiers; among
//! those, the largest size is always H1 regardless of which was most
//! frequent. Candidates at any other size are dropped.

use std::collections::{HashMap, HashSet};

use crate::detect::classify::HeadingCandidate;
use crate::model::{HeadingLevel, LeveledHeading};

/// Assign levels to candidates and de-duplicate by (text, page).
///
/// Ranking is fully deterministic: sizes are ordered by occurrence count
/// descending, frequency ties broken by larger size first. Output preserves
/// the candidates' encounter order.
pub fn assign_levels(candidates: &[HeadingCandidate]) -> Vec<LeveledHeading> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let mut counts: HashMap<i32, usize> = HashMap::new();
    for candidate in candidates {
        *counts.entry(candidate.size_tenths).or_insert(0) += 1;
    }

    // Count desc, then size desc: no reliance on hash iteration order.
    let mut ranked: Vec<(i32, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

    // The top tiers reordered by size: the largest common size is H1.
    let mut tiers: Vec<i32> = ranked.into_iter().take(3).map(|(size, _)| size).collect();
    tiers.sort_unstable_by(|a, b| b.cmp(a));

    let mut used: HashSet<(&str, usize)> = HashSet::new();
    let mut outline = Vec::new();

    for candidate in candidates {
        let Some(rank) = tiers.iter().position(|&t| t == candidate.size_tenths) else {
            continue;
        };
        let Some(level) = HeadingLevel::from_rank(rank) else {
            continue;
        };
        if used.insert((candidate.text.as_str(), candidate.page)) {
            outline.push(LeveledHeading {
                level,
                text: candidate.text.clone(),
                page: candidate.page,
            });
        }
    }

    outline
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(text: &str, size_tenths: i32, page: usize) -> HeadingCandidate {
        HeadingCandidate {
            text: text.to_string(),
            size_tenths,
            font_name: "Helvetica".to_string(),
            page,
        }
    }

    #[test]
    fn test_empty_candidates() {
        assert!(assign_levels(&[]).is_empty());
    }

    #[test]
    fn test_two_sizes_two_levels() {
        let candidates = vec![
            candidate("Chapter 1", 180, 1),
            candidate("1. Introduction", 140, 1),
        ];
        let outline = assign_levels(&candidates);
        assert_eq!(outline.len(), 2);
        assert_eq!(outline[0].level, HeadingLevel::H1);
        assert_eq!(outline[0].text, "Chapter 1");
        assert_eq!(outline[1].level, HeadingLevel::H2);
        assert_eq!(outline[1].text, "1. Introduction");
    }

    #[test]
    fn test_most_frequent_size_is_not_necessarily_h1() {
        // 14pt occurs three times and is the most frequent, but among the
        // top tiers the largest size (18pt) still becomes H1.
        let candidates = vec![
            candidate("A", 140, 1),
            candidate("B", 140, 2),
            candidate("C", 140, 3),
            candidate("Big", 180, 1),
            candidate("Mid", 160, 2),
        ];
        let outline = assign_levels(&candidates);

        let big = outline.iter().find(|h| h.text == "Big").unwrap();
        assert_eq!(big.level, HeadingLevel::H1);
        let mid = outline.iter().find(|h| h.text == "Mid").unwrap();
        assert_eq!(mid.level, HeadingLevel::H2);
        let a = outline.iter().find(|h| h.text == "A").unwrap();
        assert_eq!(a.level, HeadingLevel::H3);
    }

    #[test]
    fn test_frequency_ties_break_by_larger_size() {
        // Four sizes, all with count 1: only the three largest survive.
        let candidates = vec![
            candidate("S10", 100, 1),
            candidate("S12", 120, 1),
            candidate("S14", 140, 1),
            candidate("S16", 160, 1),
        ];
        let outline = assign_levels(&candidates);

        assert_eq!(outline.len(), 3);
        assert!(outline.iter().all(|h| h.text != "S10"));
        assert_eq!(
            outline.iter().find(|h| h.text == "S16").unwrap().level,
            HeadingLevel::H1
        );
    }

    #[test]
    fn test_sizes_outside_top_three_are_dropped() {
        let mut candidates = Vec::new();
        for page in 1..=4 {
            candidates.push(candidate(&format!("Common {}", page), 140, page));
        }
        candidates.push(candidate("Rare big", 200, 1));
        candidates.push(candidate("Rare mid", 160, 2));
        // Count 1, smallest size among the count-1 tie: ranked fourth
        candidates.push(candidate("Dropped", 110, 3));

        let outline = assign_levels(&candidates);
        assert!(outline.iter().all(|h| h.text != "Dropped"));
        assert_eq!(outline.len(), 6);
    }

    #[test]
    fn test_duplicate_text_same_page_emitted_once() {
        let candidates = vec![
            candidate("Summary", 140, 3),
            candidate("Summary", 140, 3),
        ];
        let outline = assign_levels(&candidates);
        assert_eq!(outline.len(), 1);
    }

    #[test]
    fn test_same_text_different_page_emitted_again() {
        let candidates = vec![
            candidate("Summary", 140, 3),
            candidate("Summary", 140, 7),
        ];
        let outline = assign_levels(&candidates);
        assert_eq!(outline.len(), 2);
        assert_eq!(outline[0].page, 3);
        assert_eq!(outline[1].page, 7);
    }

    #[test]
    fn test_encounter_order_preserved() {
        let candidates = vec![
            candidate("First", 140, 1),
            candidate("Second", 180, 1),
            candidate("Third", 140, 2),
        ];
        let outline = assign_levels(&candidates);
        let texts: Vec<&str> = outline.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_single_size_maps_to_h1() {
        let candidates = vec![candidate("(a) Background", 90, 1)];
        let outline = assign_levels(&candidates);
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].level, HeadingLevel::H1);
    }
}
