//! Word-boundary classification of a query occurrence.

use crate::config::RelevanceWeights;

/// How an occurrence sits relative to the surrounding whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// Whitespace or a string edge on both sides.
    Full,
    /// Whitespace or the string start on the left only.
    Partial,
    /// Embedded inside a word.
    Normal,
}

impl MatchType {
    /// Score bonus for this match type.
    pub fn bonus(self, weights: &RelevanceWeights) -> f64 {
        match self {
            Self::Full => weights.exact_match,
            Self::Partial => weights.partial_match,
            Self::Normal => 0.0,
        }
    }
}

/// Classify the occurrence of length `len` starting at `index` in `text`.
pub fn classify(text: &[char], index: usize, len: usize) -> MatchType {
    let end = index + len;
    let before = index == 0 || text.get(index - 1).is_some_and(|c| c.is_whitespace());
    let after = end >= text.len() || text.get(end).is_some_and(|c| c.is_whitespace());

    match (before, after) {
        (true, true) => MatchType::Full,
        (true, false) => MatchType::Partial,
        _ => MatchType::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn word_between_spaces_is_full() {
        let text = chars("the quick brown");
        assert_eq!(classify(&text, 4, 5), MatchType::Full);
    }

    #[test]
    fn whole_string_is_full() {
        let text = chars("quick");
        assert_eq!(classify(&text, 0, 5), MatchType::Full);
    }

    #[test]
    fn word_prefix_is_partial() {
        let text = chars("example domain");
        assert_eq!(classify(&text, 0, 4), MatchType::Partial);
    }

    #[test]
    fn newline_counts_as_boundary() {
        let text = chars("one\ntwo\nthree");
        assert_eq!(classify(&text, 4, 3), MatchType::Full);
    }

    #[test]
    fn right_boundary_alone_is_normal() {
        let text = chars("rustacean ocean");
        assert_eq!(classify(&text, 4, 5), MatchType::Normal);
        let text = chars("subway");
        assert_eq!(classify(&text, 3, 3), MatchType::Normal);
    }

    #[test]
    fn bonus_follows_weight_table() {
        let w = RelevanceWeights::default();
        assert!((MatchType::Full.bonus(&w) - 0.25).abs() < f64::EPSILON);
        assert!((MatchType::Partial.bonus(&w) - 0.15).abs() < f64::EPSILON);
        assert!(MatchType::Normal.bonus(&w).abs() < f64::EPSILON);
    }
}
