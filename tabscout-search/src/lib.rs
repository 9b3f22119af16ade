//! # tabscout-search
//!
//! Relevance scoring, snippet extraction and ranked aggregation for
//! searching open browser tabs.
//!
//! ## Design
//!
//! - A page matcher scores one document against a query: hostname, URL and
//!   title hits plus boundary-aware content occurrences, with a snippet cut
//!   around each occurrence
//! - An aggregator sends the query to every tab concurrently, tolerates
//!   unreachable or slow tabs with a content-blind fallback, and returns a
//!   stable, descending ranking
//! - Every search takes a fresh id; replies for older searches are discarded
//! - Query history and recent-tab ordering are bounded most-recent-first lists
//!   behind a pluggable [`ListStore`]
//!
//! ## Privacy
//!
//! - Queries and page text are logged only at trace level
//! - Error messages never contain queries or page content

pub mod aggregator;
pub mod config;
pub mod content;
pub mod error;
pub mod history;
pub mod matcher;
pub mod responder;
pub mod store;
pub mod transport;
pub mod types;

pub use aggregator::{Aggregator, RankedResults, ResultItem, SearchOutcome};
pub use config::{RelevanceWeights, SearchConfig, SnippetConfig};
pub use error::{Result, SearchError};
pub use matcher::match_document;
pub use responder::{PageResponder, SnapshotTransport};
pub use store::{ListStore, MemoryStore};
pub use transport::{PageMessage, PageReply, PageTransport, SearchResponse};
pub use types::{
    DocumentSnapshot, MatchResult, PageMatch, SearchResult, TabCandidate, TabId, WindowId,
};

/// Score a set of in-memory documents against `query` in one call.
///
/// Builds a throwaway [`Aggregator`] over a [`SnapshotTransport`] holding
/// `documents` (each paired with its candidate) and returns the ranked tabs.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid.
///
/// # Examples
///
/// ```
/// # async fn example() -> tabscout_search::Result<()> {
/// use tabscout_search::{DocumentSnapshot, SearchConfig, TabCandidate};
///
/// let tab = TabCandidate {
///     id: 1,
///     url: "https://example.com/".into(),
///     title: "Example Domain".into(),
///     window_id: 1,
/// };
/// let doc = DocumentSnapshot::new(&tab.url, &tab.title, "This domain is for examples.");
/// let ranked = tabscout_search::search("exam", vec![(tab, doc)], &SearchConfig::default()).await?;
/// assert_eq!(ranked.len(), 1);
/// # Ok(())
/// # }
/// ```
pub async fn search(
    query: &str,
    documents: Vec<(TabCandidate, DocumentSnapshot)>,
    config: &SearchConfig,
) -> Result<Vec<SearchResult>> {
    let transport = SnapshotTransport::new(config.clone());
    let mut candidates = Vec::with_capacity(documents.len());
    for (tab, doc) in documents {
        transport.register(tab.id, doc);
        candidates.push(tab);
    }
    let aggregator = Aggregator::new(transport, MemoryStore::new(), config.clone())?;
    Ok(aggregator.search(query, &candidates, None).await.tabs().to_vec())
}
