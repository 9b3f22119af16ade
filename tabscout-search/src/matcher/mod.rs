//! Page matcher: relevance scoring and snippet extraction for one document.
//!
//! Scores are additive over the weight table in
//! [`RelevanceWeights`](crate::config::RelevanceWeights):
//!
//! 1. hostname match (`host`), otherwise URL match (`url`)
//! 2. title match (`title`) plus a boundary bonus for its first occurrence
//! 3. a boundary bonus for each content occurrence, up to `max_snippets`
//! 4. a flat `content` bonus once any content occurrence was found

pub mod boundary;
pub mod snippet;
pub mod text;

use crate::config::SearchConfig;
use crate::types::{DocumentSnapshot, MatchResult, PageMatch};

use boundary::classify;
use snippet::get_snippet;
use text::{find_from, fold, fold_char, fold_str, normalize_text};

/// Match `query` against `doc`, returning the page score and snippets.
///
/// Matching is case-insensitive. An empty query never matches.
pub fn match_document(query: &str, doc: &DocumentSnapshot, config: &SearchConfig) -> PageMatch {
    let needle = fold(query);
    if needle.is_empty() {
        return PageMatch::none();
    }
    let needle_str: String = needle.iter().collect();
    let weights = &config.weights;

    let host_match = fold_str(&doc.hostname).contains(&needle_str);
    let url_match = fold_str(&doc.url).contains(&needle_str);

    let mut score = 0.0;
    if host_match {
        score += weights.host;
    } else if url_match {
        score += weights.url;
    }

    let title = fold(&doc.title);
    let title_index = find_from(&title, &needle, 0);
    if let Some(index) = title_index {
        score += weights.title;
        score += classify(&title, index, needle.len()).bonus(weights);
    }

    let original: Vec<char> = normalize_text(&doc.visible_text).chars().collect();
    let page: Vec<char> = original.iter().copied().map(fold_char).collect();

    let mut results = Vec::new();
    let mut cursor = 0;
    while results.len() < config.max_snippets {
        let Some(index) = find_from(&page, &needle, cursor) else {
            break;
        };
        let end = index + needle.len();
        score += classify(&page, index, needle.len()).bonus(weights);
        results.push(MatchResult {
            snippet: get_snippet(&original, index, end, &config.snippet),
            relevance_score: score,
        });
        cursor = end;
    }

    if !results.is_empty() {
        score += weights.content;
    }

    let match_found = host_match || url_match || title_index.is_some() || !results.is_empty();
    tracing::trace!(
        url = %doc.url,
        host_match,
        url_match,
        title_match = title_index.is_some(),
        occurrences = results.len(),
        score,
        "page matched"
    );

    PageMatch {
        match_found,
        relevance_score: score,
        results,
    }
}
