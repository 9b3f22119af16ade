//! Result aggregator: concurrent fan-out to tabs, fallback, ranking.
//!
//! An [`Aggregator`] owns the search-id counter, the transport to the open
//! tabs and the list store holding query history. Each search:
//!
//! 1. takes the next search id, superseding any search still in flight
//! 2. sends the query to every candidate concurrently, each with a deadline
//! 3. drops replies carrying a different search id
//! 4. routes unreachable candidates through [`fallback::fallback_match`]
//! 5. ranks the matches with a stable descending sort
//! 6. appends the web-search item and matching history entries

pub mod dispatch;
pub mod fallback;
pub mod ranking;

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::Mutex;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::history::{matching_queries, RecentList};
use crate::store::{ListStore, HISTORY_KEY};
use crate::transport::{PageMessage, PageTransport};
use crate::types::{SearchResult, TabCandidate, TabId, WindowId};

use dispatch::{deliver, dispatch_search, unresponsive, Dispatch};
use fallback::fallback_match;
use ranking::{rank, sanitize_score};

/// The ranked answer to one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResults {
    /// Identifier of the search that produced these results.
    pub search_id: u64,
    /// The query as typed.
    pub query: String,
    /// Matching tabs, best first.
    pub tabs: Vec<SearchResult>,
    /// Offer to search the web for the query, when enabled.
    pub web_search: Option<String>,
    /// Earlier queries containing this one, most recent first.
    pub history: Vec<String>,
}

impl RankedResults {
    /// All items in presentation order: tabs, web search, history.
    pub fn items(&self) -> impl Iterator<Item = ResultItem<'_>> {
        self.tabs
            .iter()
            .map(ResultItem::Tab)
            .chain(self.web_search.as_deref().map(ResultItem::WebSearch))
            .chain(self.history.iter().map(|h| ResultItem::History(h)))
    }
}

/// One presented entry of a [`RankedResults`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultItem<'a> {
    /// A matching tab.
    Tab(&'a SearchResult),
    /// "Search the web for" the query.
    WebSearch(&'a str),
    /// A matching earlier query.
    History(&'a str),
}

/// Outcome of [`Aggregator::search`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SearchOutcome {
    /// The query was empty: every candidate, unscored, in input order.
    Listing {
        /// One entry per candidate.
        tabs: Vec<SearchResult>,
    },
    /// The query was searched.
    Ranked(RankedResults),
    /// A newer search started before this one collected its replies.
    Superseded {
        /// This search's id.
        search_id: u64,
        /// The id of the newest search.
        latest: u64,
    },
}

/// Searches open tabs through a [`PageTransport`].
#[derive(Debug)]
pub struct Aggregator<T, S> {
    transport: T,
    store: S,
    config: SearchConfig,
    search_id: AtomicU64,
    history_update: Mutex<()>,
}

impl<T: PageTransport, S: ListStore> Aggregator<T, S> {
    /// Create an aggregator after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`](crate::SearchError::Config) if `config` is invalid.
    pub fn new(transport: T, store: S, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport,
            store,
            config,
            search_id: AtomicU64::new(0),
            history_update: Mutex::new(()),
        })
    }

    /// The transport used to reach tabs.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The store holding query history.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Id of the most recently started search.
    pub fn latest_search_id(&self) -> u64 {
        self.search_id.load(Ordering::SeqCst)
    }

    fn next_search_id(&self) -> u64 {
        self.search_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Search `candidates` for `query`.
    ///
    /// Candidates are dispatched in the given order, which is also the
    /// tie-break order of the ranking. Unreachable candidates fall back to a
    /// URL/title check. Nothing here fails the search as a whole.
    pub async fn search(
        &self,
        query: &str,
        candidates: &[TabCandidate],
        current_window: Option<WindowId>,
    ) -> SearchOutcome {
        let search_id = self.next_search_id();

        if query.is_empty() {
            let tabs = candidates
                .iter()
                .map(|tab| SearchResult::for_tab(tab, "", Vec::new(), 0.0, current_window))
                .collect();
            return SearchOutcome::Listing { tabs };
        }

        tracing::trace!(search_id, query, "dispatching search");
        let outcomes = dispatch_search(
            &self.transport,
            candidates,
            query,
            search_id,
            self.config.candidate_timeout(),
        )
        .await;

        let latest = self.latest_search_id();
        if latest != search_id {
            tracing::debug!(search_id, latest, "search superseded; discarding replies");
            return SearchOutcome::Superseded { search_id, latest };
        }

        let mut matches = Vec::new();
        let mut unreachable = 0usize;
        for (tab, outcome) in candidates.iter().zip(outcomes) {
            match outcome {
                Dispatch::Replied(reply) if reply.search_id != search_id => {
                    tracing::debug!(
                        tab = tab.id,
                        reply_id = reply.search_id,
                        search_id,
                        "ignoring reply for another search"
                    );
                }
                Dispatch::Replied(reply) => {
                    tracing::debug!(
                        tab = tab.id,
                        score = reply.relevance_score,
                        matched = reply.match_found_anywhere,
                        "page replied"
                    );
                    if reply.match_found_anywhere {
                        matches.push(SearchResult::for_tab(
                            tab,
                            query,
                            reply.results,
                            sanitize_score(reply.relevance_score),
                            current_window,
                        ));
                    }
                }
                Dispatch::Unreachable(err) => {
                    tracing::warn!(tab = tab.id, error = %err, "page unreachable; using fallback match");
                    unreachable += 1;
                    matches.extend(fallback_match(tab, query, current_window));
                }
            }
        }

        let tabs = rank(matches);
        let history = match self.history().await {
            Ok(history) => matching_queries(&history, query),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load query history");
                Vec::new()
            }
        };

        tracing::info!(
            search_id,
            candidates = candidates.len(),
            unreachable,
            matched = tabs.len(),
            "search complete"
        );

        SearchOutcome::Ranked(RankedResults {
            search_id,
            query: query.to_owned(),
            tabs,
            web_search: self.config.web_search_item.then(|| query.to_owned()),
            history,
        })
    }

    /// Query history, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Storage`](crate::SearchError::Storage) if the history cannot be loaded.
    pub async fn history(&self) -> Result<Vec<String>> {
        self.store.load(HISTORY_KEY).await
    }

    /// Record `query` at the front of the history.
    ///
    /// Blank queries are ignored. An earlier entry differing only in case is
    /// replaced. Concurrent calls are applied one at a time.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Storage`](crate::SearchError::Storage) if the history cannot be loaded or saved.
    pub async fn record_query(&self, query: &str) -> Result<()> {
        if query.trim().is_empty() {
            return Ok(());
        }
        let _guard = self.history_update.lock().await;
        let stored: Vec<String> = self.store.load(HISTORY_KEY).await?;
        let mut history = RecentList::from_vec(stored, self.config.max_history_items);
        history.touch_query(query);
        self.store.save(HISTORY_KEY, history.as_slice()).await
    }

    /// The user picked tab `tab` for `query`: record the query and ask the
    /// page to select its first occurrence.
    ///
    /// A page that cannot be reached is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Storage`](crate::SearchError::Storage) if the history cannot be updated.
    pub async fn select(&self, tab: TabId, query: &str) -> Result<()> {
        self.record_query(query).await?;
        let message = PageMessage::Highlight {
            search_query: query.to_owned(),
        };
        if let Err(err) = deliver(&self.transport, tab, message, self.config.candidate_timeout()).await {
            tracing::warn!(tab, error = %err, "failed to highlight query in page");
        }
        Ok(())
    }

    /// Ping every candidate and return the ids of those that did not answer.
    pub async fn probe(&self, candidates: &[TabCandidate]) -> Vec<TabId> {
        unresponsive(&self.transport, candidates, self.config.candidate_timeout()).await
    }
}

impl SearchOutcome {
    /// Consume the outcome, keeping only ranked results.
    pub fn into_ranked(self) -> Option<RankedResults> {
        match self {
            Self::Ranked(ranked) => Some(ranked),
            _ => None,
        }
    }

    /// The ranked results, if this outcome has them.
    pub fn ranked(&self) -> Option<&RankedResults> {
        match self {
            Self::Ranked(ranked) => Some(ranked),
            _ => None,
        }
    }

    /// Tabs in presentation order; empty when superseded.
    pub fn tabs(&self) -> &[SearchResult] {
        match self {
            Self::Listing { tabs } => tabs,
            Self::Ranked(ranked) => &ranked.tabs,
            Self::Superseded { .. } => &[],
        }
    }
}
