//! Message contract between the aggregator and the pages it searches.
//!
//! Each open tab runs a responder that answers [`PageMessage`]s. The
//! aggregator reaches responders through a [`PageTransport`], which may be
//! an in-process registry, a browser messaging bridge, or a test double.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::{MatchResult, TabId};

/// A request sent to one page.
///
/// Serialises as `{"context": "search", "searchQuery": .., "searchId": ..}`,
/// `{"context": "highlight", "searchQuery": ..}` or
/// `{"context": "checkScriptStatus"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "context", rename_all = "camelCase")]
pub enum PageMessage {
    /// Score the page against a query.
    Search {
        /// The raw query string.
        #[serde(rename = "searchQuery")]
        search_query: String,
        /// Identifier echoed back in the reply.
        #[serde(rename = "searchId")]
        search_id: u64,
    },
    /// Select the first occurrence of the query in the page.
    Highlight {
        /// The raw query string.
        #[serde(rename = "searchQuery")]
        search_query: String,
    },
    /// Liveness ping; answered with an empty acknowledgement.
    CheckScriptStatus,
}

/// A page's answer to [`PageMessage::Search`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// The `search_id` of the request being answered.
    pub search_id: u64,
    /// Content snippets.
    pub results: Vec<MatchResult>,
    /// Whether the URL, title or content matched.
    pub match_found_anywhere: bool,
    /// Page relevance score.
    pub relevance_score: f64,
}

/// Reply to any [`PageMessage`].
#[derive(Debug, Clone, PartialEq)]
pub enum PageReply {
    /// Answer to a search request.
    Search(SearchResponse),
    /// Empty acknowledgement (highlight, liveness ping).
    Ack,
}

/// A channel to the responders of open tabs.
///
/// Implementations deliver one message to one tab and return its reply.
/// A tab with no listener, a closed tab, or a broken channel is reported as
/// [`SearchError::Transport`]. All implementations must be `Send + Sync`
/// so that messages to many tabs can be in flight at once.
pub trait PageTransport: Send + Sync {
    /// Deliver `message` to tab `tab` and wait for its reply.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the message cannot be delivered or the
    /// reply cannot be interpreted.
    fn send(
        &self,
        tab: TabId,
        message: PageMessage,
    ) -> impl std::future::Future<Output = Result<PageReply, SearchError>> + Send;
}
