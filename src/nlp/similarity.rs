//! Word-set similarity used by the fallback search and the learned-example
//! responder

use std::collections::HashSet;

/// Jaccard similarity between two texts: intersection over union of their
/// lowercase whitespace-tokenized word sets. Returns 0.0 when both sets are
/// empty or disjoint.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let words_a: HashSet<String> = a.to_lowercase().split_whitespace().map(String::from).collect();
    let words_b: HashSet<String> = b.to_lowercase().split_whitespace().map(String::from).collect();

    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = words_a.intersection(&words_b).count();
    intersection as f64 / union as f64
}
