//! Reference sentences and their proximity windows.
//!
//! A reference sentence literally names a figure. Each one contributes the
//! up-to-[`WINDOW_RADIUS`] sentences on either side of it to the proximity
//! set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::nlp::tokenizer::tokenize_words;

/// Case-sensitive word tokens that mark a figure reference.
pub const REFERENCE_TOKENS: [&str; 4] = ["FIGURE", "Figure", "FIG", "Fig"];

/// Sentences on each side of a reference sentence that join its window.
pub const WINDOW_RADIUS: usize = 10;

/// How the right edge of a proximity window is bounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPolicy {
    /// Both edges clipped to the corpus.
    #[default]
    Clipped,
    /// Only the left edge is clipped; indices past the last sentence may
    /// appear when a reference sits near the end.
    LeftClipped,
}

/// Reference and proximity sets over one corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceFeatures {
    pub reference: BTreeSet<usize>,
    pub proximity: BTreeSet<usize>,
}

/// Whether the raw sentence contains one of [`REFERENCE_TOKENS`].
pub fn is_reference_sentence(sentence: &str) -> bool {
    tokenize_words(sentence)
        .into_iter()
        .any(|token| REFERENCE_TOKENS.contains(&token))
}

/// Extract with the default [`WindowPolicy::Clipped`].
pub fn extract<S: AsRef<str>>(sentences: &[S]) -> ReferenceFeatures {
    extract_with(sentences, WindowPolicy::default())
}

pub fn extract_with<S: AsRef<str>>(sentences: &[S], policy: WindowPolicy) -> ReferenceFeatures {
    let n = sentences.len();
    let mut features = ReferenceFeatures::default();

    for (i, sentence) in sentences.iter().enumerate() {
        if !is_reference_sentence(sentence.as_ref()) {
            continue;
        }
        features.reference.insert(i);

        let right_end = match policy {
            WindowPolicy::Clipped => (i + WINDOW_RADIUS + 1).min(n),
            WindowPolicy::LeftClipped => i + WINDOW_RADIUS + 1,
        };
        features
            .proximity
            .extend((i.saturating_sub(WINDOW_RADIUS)..i).chain(i + 1..right_end));
    }

    features
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus_with_refs(n: usize, refs: &[usize]) -> Vec<String> {
        (0..n)
            .map(|i| {
                if refs.contains(&i) {
                    format!("As Figure {i} shows, it works.")
                } else {
                    format!("Plain sentence number {i}.")
                }
            })
            .collect()
    }

    #[test]
    fn test_reference_tokens_are_case_sensitive() {
        assert!(is_reference_sentence("See Figure 2 for details."));
        assert!(is_reference_sentence("See Fig 2."));
        assert!(is_reference_sentence("(FIG 3)"));
        assert!(is_reference_sentence("FIGURE 1: overview"));
        assert!(!is_reference_sentence("the figure below"));
        assert!(!is_reference_sentence("Figures 2 and 3"));
        assert!(!is_reference_sentence("A configuration file."));
    }

    #[test]
    fn test_small_corpus_window() {
        let sentences = corpus_with_refs(5, &[2]);
        let features = extract(&sentences);
        assert_eq!(features.reference, BTreeSet::from([2]));
        assert_eq!(features.proximity, BTreeSet::from([0, 1, 3, 4]));
    }

    #[test]
    fn test_left_clipped_policy_leaves_right_edge_open() {
        let sentences = corpus_with_refs(5, &[2]);
        let features = extract_with(&sentences, WindowPolicy::LeftClipped);
        let expected: BTreeSet<usize> = [0, 1].into_iter().chain(3..=12).collect();
        assert_eq!(features.proximity, expected);
    }

    #[test]
    fn test_left_edge_clipped() {
        let sentences = corpus_with_refs(30, &[3]);
        let features = extract(&sentences);
        assert_eq!(features.proximity.first(), Some(&0));
        assert_eq!(features.proximity.len(), 3 + WINDOW_RADIUS);
        assert!(!features.proximity.contains(&3));
    }

    #[test]
    fn test_full_window() {
        let sentences = corpus_with_refs(40, &[20]);
        let features = extract(&sentences);
        let expected: BTreeSet<usize> = (10..20).chain(21..31).collect();
        assert_eq!(features.proximity, expected);
    }

    #[test]
    fn test_distant_references_give_disjoint_windows() {
        let sentences = corpus_with_refs(60, &[10, 35]);
        let features = extract(&sentences);
        let first: BTreeSet<usize> = (0..10).chain(11..21).collect();
        let second: BTreeSet<usize> = (25..35).chain(36..46).collect();
        assert!(first.is_disjoint(&second));
        assert_eq!(
            features.proximity,
            first.union(&second).copied().collect::<BTreeSet<_>>()
        );
        assert_eq!(features.proximity.len(), 2 * 2 * WINDOW_RADIUS);
    }

    #[test]
    fn test_close_references_union() {
        let sentences = corpus_with_refs(60, &[20, 25]);
        let features = extract(&sentences);
        assert_eq!(features.reference, BTreeSet::from([20, 25]));
        assert!(features.proximity.len() < 2 * 2 * WINDOW_RADIUS);
        // Each reference sits inside the other's window.
        assert!(features.proximity.contains(&20));
        assert!(features.proximity.contains(&25));
        let expected: BTreeSet<usize> = (10..=35).collect();
        assert_eq!(features.proximity, expected);
    }

    #[test]
    fn test_no_references() {
        let sentences = corpus_with_refs(8, &[]);
        assert_eq!(extract(&sentences), ReferenceFeatures::default());
    }
}
