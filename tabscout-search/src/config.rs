//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] holds the relevance weight table, the snippet window,
//! the per-candidate deadline and the history bounds. The defaults mirror
//! the weights the ranking was tuned with.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Additive weights used by the page matcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceWeights {
    /// Query found in the hostname. Supersedes `url`.
    pub host: f64,
    /// Query found in the URL but not the hostname.
    pub url: f64,
    /// Query found in the title.
    pub title: f64,
    /// Occurrence bounded by whitespace or string edges on both sides.
    pub exact_match: f64,
    /// Occurrence bounded on the left only.
    pub partial_match: f64,
    /// Flat bonus once at least one content occurrence was found.
    pub content: f64,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            host: 0.95,
            url: 0.75,
            title: 0.5,
            exact_match: 0.25,
            partial_match: 0.15,
            content: 0.25,
        }
    }
}

impl RelevanceWeights {
    fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("host", self.host),
            ("url", self.url),
            ("title", self.title),
            ("exact_match", self.exact_match),
            ("partial_match", self.partial_match),
            ("content", self.content),
        ]
    }
}

/// Window used when cutting a snippet around an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetConfig {
    /// Characters kept before the occurrence.
    pub max_chars_before: usize,
    /// Characters kept after the occurrence.
    pub max_chars_after: usize,
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            max_chars_before: 40,
            max_chars_after: 60,
        }
    }
}

/// Configuration for a tab search.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Relevance weight table.
    pub weights: RelevanceWeights,
    /// Snippet window.
    pub snippet: SnippetConfig,
    /// Content occurrences (and snippets) collected per page.
    pub max_snippets: usize,
    /// Deadline for a single page to answer, in milliseconds.
    pub candidate_timeout_ms: u64,
    /// Whether to append a "search the web" item after the ranked tabs.
    pub web_search_item: bool,
    /// Capacity of the query history.
    pub max_history_items: usize,
    /// Capacity of the recent-tabs list.
    pub max_recent_tabs: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            weights: RelevanceWeights::default(),
            snippet: SnippetConfig::default(),
            max_snippets: 1,
            candidate_timeout_ms: 1500,
            web_search_item: true,
            max_history_items: 50,
            max_recent_tabs: 100,
        }
    }
}

impl SearchConfig {
    /// Per-candidate deadline as a [`Duration`].
    pub fn candidate_timeout(&self) -> Duration {
        Duration::from_millis(self.candidate_timeout_ms)
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - every weight is finite and non-negative
    /// - the snippet window is not empty
    /// - `max_snippets`, `candidate_timeout_ms`, `max_history_items` and
    ///   `max_recent_tabs` are greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        for (name, weight) in self.weights.entries() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(SearchError::Config(format!(
                    "weight {name} must be a non-negative finite number"
                )));
            }
        }
        if self.snippet.max_chars_before == 0 && self.snippet.max_chars_after == 0 {
            return Err(SearchError::Config(
                "snippet window must keep at least one character".into(),
            ));
        }
        if self.max_snippets == 0 {
            return Err(SearchError::Config(
                "max_snippets must be greater than 0".into(),
            ));
        }
        if self.candidate_timeout_ms == 0 {
            return Err(SearchError::Config(
                "candidate_timeout_ms must be greater than 0".into(),
            ));
        }
        if self.max_history_items == 0 {
            return Err(SearchError::Config(
                "max_history_items must be greater than 0".into(),
            ));
        }
        if self.max_recent_tabs == 0 {
            return Err(SearchError::Config(
                "max_recent_tabs must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.max_snippets, 1);
        assert_eq!(config.candidate_timeout(), Duration::from_millis(1500));
        assert!(config.web_search_item);
        assert_eq!(config.max_history_items, 50);
        assert_eq!(config.max_recent_tabs, 100);
        assert_eq!(config.snippet.max_chars_before, 40);
        assert_eq!(config.snippet.max_chars_after, 60);
    }

    #[test]
    fn default_weights_rank_host_over_url_over_title() {
        let w = RelevanceWeights::default();
        assert!(w.host > w.url);
        assert!(w.url > w.title);
        assert!(w.exact_match > w.partial_match);
        assert!((w.content - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn negative_weight_rejected() {
        let config = SearchConfig {
            weights: RelevanceWeights {
                title: -0.1,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn nan_weight_rejected() {
        let config = SearchConfig {
            weights: RelevanceWeights {
                content: f64::NAN,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_snippet_window_rejected() {
        let config = SearchConfig {
            snippet: SnippetConfig {
                max_chars_before: 0,
                max_chars_after: 0,
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("snippet"));
    }

    #[test]
    fn zero_max_snippets_rejected() {
        let config = SearchConfig {
            max_snippets: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_snippets"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            candidate_timeout_ms: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("candidate_timeout_ms"));
    }

    #[test]
    fn zero_history_capacity_rejected() {
        let config = SearchConfig {
            max_history_items: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"weights":{"host":2.0},"max_snippets":3}"#).expect("parse");
        assert!((config.weights.host - 2.0).abs() < f64::EPSILON);
        assert!((config.weights.url - 0.75).abs() < f64::EPSILON);
        assert_eq!(config.max_snippets, 3);
        assert_eq!(config.max_history_items, 50);
    }
}
