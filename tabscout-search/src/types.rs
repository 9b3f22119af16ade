//! Core types for page snapshots, match results and ranked tab results.

use serde::{Deserialize, Serialize};
use url::Url;

/// Identifier of an open tab.
pub type TabId = u64;

/// Identifier of a browser window.
pub type WindowId = u64;

/// Read-only view of a candidate page at scoring time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    /// Full page URL.
    pub url: String,
    /// Host part of `url`, empty when the URL has none.
    pub hostname: String,
    /// Document title.
    pub title: String,
    /// Rendered text of the page body, before whitespace normalisation.
    pub visible_text: String,
}

impl DocumentSnapshot {
    /// Build a snapshot, deriving the hostname from `url`.
    pub fn new(url: impl Into<String>, title: impl Into<String>, visible_text: impl Into<String>) -> Self {
        let url = url.into();
        let hostname = hostname_of(&url);
        Self {
            url,
            hostname,
            title: title.into(),
            visible_text: visible_text.into(),
        }
    }
}

/// A snippet of page content around one query occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Snippet text in original casing, with whitespace runs collapsed.
    pub snippet: String,
    /// Running page score at the moment this occurrence was recorded.
    pub relevance_score: f64,
}

/// Outcome of matching one query against one document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMatch {
    /// Whether the URL, hostname, title or content contained the query.
    pub match_found: bool,
    /// Additive, non-negative relevance score.
    pub relevance_score: f64,
    /// Content snippets, at most `max_snippets` of them.
    pub results: Vec<MatchResult>,
}

impl PageMatch {
    /// A page that did not match at all.
    pub fn none() -> Self {
        Self::default()
    }
}

/// A dispatchable candidate tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabCandidate {
    /// Tab identifier used to address the page.
    pub id: TabId,
    /// Tab URL as reported by the browser.
    pub url: String,
    /// Tab title as reported by the browser.
    pub title: String,
    /// Window the tab belongs to.
    pub window_id: WindowId,
}

impl TabCandidate {
    /// Host part of the tab URL.
    pub fn hostname(&self) -> String {
        hostname_of(&self.url)
    }
}

/// Per-tab aggregate produced by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Tab identifier.
    pub id: TabId,
    /// Tab URL.
    pub url: String,
    /// Host part of the URL.
    pub hostname: String,
    /// Tab title.
    pub title: String,
    /// The query this result answers; empty in the listing view.
    pub search_query: String,
    /// Content snippets returned by the page.
    pub results: Vec<MatchResult>,
    /// Score used for ranking. Zero for fallback and listing results.
    pub relevance_score: f64,
    /// Whether the tab lives in the caller's current window.
    pub is_current_window: bool,
    /// `true` iff `results` is non-empty.
    pub has_snippets: bool,
}

impl SearchResult {
    /// Build a result for `tab`, deriving `hostname` and `has_snippets`.
    pub fn for_tab(
        tab: &TabCandidate,
        search_query: &str,
        results: Vec<MatchResult>,
        relevance_score: f64,
        current_window: Option<WindowId>,
    ) -> Self {
        let has_snippets = !results.is_empty();
        Self {
            id: tab.id,
            url: tab.url.clone(),
            hostname: tab.hostname(),
            title: tab.title.clone(),
            search_query: search_query.to_owned(),
            results,
            relevance_score,
            is_current_window: current_window == Some(tab.window_id),
            has_snippets,
        }
    }
}

/// Host part of `url`, or an empty string when it cannot be parsed.
pub fn hostname_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_default()
}
