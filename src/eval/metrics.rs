//! Automated lexical-overlap metrics.
//!
//! Model-free similarity scores between generated and reference text, based
//! on case-folded whitespace tokenization plus a character-set Jaccard.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Lexical-overlap scores for one generated/reference pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomatedMetrics {
    /// Generated word count over reference word count.
    pub length_ratio: f64,
    /// Token overlap over the generated token set.
    pub word_precision: f64,
    /// Token overlap over the reference token set.
    pub word_recall: f64,
    /// Harmonic mean of precision and recall.
    pub word_f1: f64,
    /// Character-set intersection over union.
    pub char_jaccard: f64,
}

/// Compute lexical-overlap metrics for `generated` against `reference`.
///
/// Every division is guarded: an empty side yields 0.0 for the affected
/// scores, never a division failure. An empty reference zeroes both
/// `length_ratio` and `char_jaccard`.
pub fn calculate_metrics(generated: &str, reference: &str) -> AutomatedMetrics {
    let generated_folded = generated.to_lowercase();
    let reference_folded = reference.to_lowercase();

    let generated_words: HashSet<&str> = generated_folded.split_whitespace().collect();
    let reference_words: HashSet<&str> = reference_folded.split_whitespace().collect();
    let overlap = generated_words.intersection(&reference_words).count() as f64;

    let word_precision = if generated_words.is_empty() {
        0.0
    } else {
        overlap / generated_words.len() as f64
    };
    let word_recall = if reference_words.is_empty() {
        0.0
    } else {
        overlap / reference_words.len() as f64
    };
    let word_f1 = if word_precision + word_recall > 0.0 {
        2.0 * word_precision * word_recall / (word_precision + word_recall)
    } else {
        0.0
    };

    let reference_word_count = reference.split_whitespace().count();
    let length_ratio = if reference.is_empty() || reference_word_count == 0 {
        0.0
    } else {
        generated.split_whitespace().count() as f64 / reference_word_count as f64
    };

    let char_jaccard = if reference.is_empty() {
        0.0
    } else {
        let generated_chars: HashSet<char> = generated.chars().collect();
        let reference_chars: HashSet<char> = reference.chars().collect();
        let union = generated_chars.union(&reference_chars).count();
        if union == 0 {
            0.0
        } else {
            generated_chars.intersection(&reference_chars).count() as f64 / union as f64
        }
    };

    AutomatedMetrics {
        length_ratio,
        word_precision,
        word_recall,
        word_f1,
        char_jaccard,
    }
}
