//! Token-overlap scoring between display names, used to flag suggested
//! matches whose names disagree with the candidate.

use std::collections::HashSet;

/// Default threshold for [`are_similar`]; callers may override per call.
pub const DEFAULT_NAME_SIMILARITY_THRESHOLD: f64 = 0.5;

/// Computes a 0..1 overlap score between two display names.
///
/// Names are lowercased and split on whitespace into token sets; the score
/// is the shared-token count over the larger set size. Identical names
/// (after lowercasing) short-circuit to 1, and a name with no tokens scores
/// 0 against anything.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    let tokens_a: HashSet<&str> = a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    if a == b {
        return 1.0;
    }

    let shared = tokens_a.intersection(&tokens_b).count();
    shared as f64 / tokens_a.len().max(tokens_b.len()) as f64
}

/// True when `similarity(a, b)` meets `threshold`.
pub fn are_similar(a: &str, b: &str, threshold: f64) -> bool {
    similarity(a, b) >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_names_score_one() {
        assert_eq!(similarity("John Doe", "John Doe"), 1.0);
        assert_eq!(similarity("John Doe", "john doe"), 1.0);
    }

    #[test]
    fn test_partial_overlap() {
        let score = similarity("John Doe", "John Michael Doe");
        assert!((score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_names_score_low() {
        assert!(similarity("John Doe", "Jane Smith") < 0.5);
        assert_eq!(similarity("John Doe", "Alice Cooper"), 0.0);
    }

    #[test]
    fn test_empty_names_score_zero() {
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("John Doe", ""), 0.0);
        assert_eq!(similarity("   ", "John Doe"), 0.0);
    }

    #[test]
    fn test_repeated_tokens_count_once() {
        // "John John Doe" tokenizes to the same set as "John Doe".
        assert_eq!(similarity("John John Doe", "Doe John"), 1.0);
    }

    #[test]
    fn test_are_similar_threshold() {
        assert!(are_similar(
            "John Doe",
            "John Michael Doe",
            DEFAULT_NAME_SIMILARITY_THRESHOLD
        ));
        assert!(!are_similar("John Doe", "Jane Smith", 0.5));
        // Caller-supplied threshold wins.
        assert!(are_similar("John Doe", "Jane Doe", 0.4));
    }
}
