//! Ranking of per-tab results.
//!
//! Results are sorted by relevance, descending. The sort is stable, so tabs
//! with equal scores keep the order they were dispatched in.

use std::cmp::Ordering;

use crate::types::SearchResult;

/// Clamp a score reported by a page into the non-negative finite range.
pub fn sanitize_score(score: f64) -> f64 {
    if score.is_finite() && score > 0.0 {
        score
    } else {
        0.0
    }
}

/// Sort `results` by score, descending, keeping dispatch order among ties.
pub fn rank(mut results: Vec<SearchResult>) -> Vec<SearchResult> {
    results.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(Ordering::Equal)
    });
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: u64, score: f64) -> SearchResult {
        SearchResult {
            id,
            url: format!("https://t{id}.test"),
            hostname: format!("t{id}.test"),
            title: String::new(),
            search_query: "q".into(),
            results: vec![],
            relevance_score: score,
            is_current_window: false,
            has_snippets: false,
        }
    }

    #[test]
    fn sorted_by_score_descending() {
        let ranked = rank(vec![result(1, 0.5), result(2, 1.5), result(3, 1.0)]);
        let ids: Vec<u64> = ranked.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn ties_keep_dispatch_order() {
        let ranked = rank(vec![
            result(1, 0.0),
            result(2, 0.75),
            result(3, 0.0),
            result(4, 0.75),
            result(5, 0.0),
        ]);
        let ids: Vec<u64> = ranked.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3, 5]);
    }

    #[test]
    fn output_is_non_increasing() {
        let scores = [0.3, 2.0, 0.0, 1.2, 1.2, 0.95, 0.4];
        let ranked = rank(
            scores
                .iter()
                .enumerate()
                .map(|(i, &s)| result(i as u64, s))
                .collect(),
        );
        for pair in ranked.windows(2) {
            assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
    }

    #[test]
    fn empty_input_ranks_empty() {
        assert!(rank(vec![]).is_empty());
    }

    #[test]
    fn sanitize_clamps_bad_scores() {
        assert!(sanitize_score(-1.0).abs() < f64::EPSILON);
        assert!(sanitize_score(f64::NAN).abs() < f64::EPSILON);
        assert!(sanitize_score(f64::INFINITY).abs() < f64::EPSILON);
        assert!((sanitize_score(0.65) - 0.65).abs() < f64::EPSILON);
    }
}
