//! In-page responder and an in-process transport routing to responders.
//!
//! A [`PageResponder`] answers [`PageMessage`]s for one document snapshot.
//! [`SnapshotTransport`] keeps a registry of responders keyed by tab and
//! implements [`PageTransport`] over it; a tab without a registered
//! responder fails like a page with no listener.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::matcher::match_document;
use crate::transport::{PageMessage, PageReply, PageTransport, SearchResponse};
use crate::types::{DocumentSnapshot, TabId};

/// Answers page messages for a single document.
#[derive(Debug)]
pub struct PageResponder {
    snapshot: DocumentSnapshot,
    config: SearchConfig,
    highlighted: Mutex<Option<String>>,
}

impl PageResponder {
    /// Create a responder for `snapshot` scoring with `config`.
    pub fn new(snapshot: DocumentSnapshot, config: SearchConfig) -> Self {
        Self {
            snapshot,
            config,
            highlighted: Mutex::new(None),
        }
    }

    /// The document this responder serves.
    pub fn snapshot(&self) -> &DocumentSnapshot {
        &self.snapshot
    }

    /// The query most recently selected in the page, if any.
    pub fn highlighted(&self) -> Option<String> {
        self.highlighted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Handle one message.
    pub fn handle(&self, message: PageMessage) -> PageReply {
        match message {
            PageMessage::Search {
                search_query,
                search_id,
            } => {
                let page = match_document(&search_query, &self.snapshot, &self.config);
                PageReply::Search(SearchResponse {
                    search_id,
                    results: page.results,
                    match_found_anywhere: page.match_found,
                    relevance_score: page.relevance_score,
                })
            }
            PageMessage::Highlight { search_query } => {
                *self.highlighted.lock().unwrap_or_else(|e| e.into_inner()) = Some(search_query);
                PageReply::Ack
            }
            PageMessage::CheckScriptStatus => PageReply::Ack,
        }
    }
}

/// In-process [`PageTransport`] backed by a registry of responders.
#[derive(Debug, Default)]
pub struct SnapshotTransport {
    config: SearchConfig,
    pages: RwLock<HashMap<TabId, Arc<PageResponder>>>,
}

impl SnapshotTransport {
    /// Create an empty registry whose responders score with `config`.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            pages: RwLock::new(HashMap::new()),
        }
    }

    /// Attach a responder for `tab`, replacing any previous one.
    pub fn register(&self, tab: TabId, snapshot: DocumentSnapshot) {
        let responder = Arc::new(PageResponder::new(snapshot, self.config.clone()));
        self.pages
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(tab, responder);
    }

    /// Detach the responder for `tab`. Returns whether one was attached.
    pub fn unregister(&self, tab: TabId) -> bool {
        self.pages
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&tab)
            .is_some()
    }

    /// The responder attached to `tab`, if any.
    pub fn responder(&self, tab: TabId) -> Option<Arc<PageResponder>> {
        self.pages
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&tab)
            .cloned()
    }

    /// Number of attached responders.
    pub fn len(&self) -> usize {
        self.pages.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether no responder is attached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PageTransport for SnapshotTransport {
    async fn send(&self, tab: TabId, message: PageMessage) -> Result<PageReply, SearchError> {
        let responder = self.responder(tab).ok_or_else(|| {
            SearchError::Transport(format!("could not establish connection with tab {tab}"))
        })?;
        Ok(responder.handle(message))
    }
}
