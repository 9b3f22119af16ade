//! Concurrent fan-out of page messages with a per-candidate deadline.

use std::time::Duration;

use crate::error::SearchError;
use crate::transport::{PageMessage, PageReply, PageTransport, SearchResponse};
use crate::types::{TabCandidate, TabId};

/// What came back from one candidate.
#[derive(Debug)]
pub enum Dispatch {
    /// The page answered the search.
    Replied(SearchResponse),
    /// The page could not be reached, timed out, or answered nonsense.
    Unreachable(SearchError),
}

/// Deliver one message, failing with [`SearchError::Timeout`] after `deadline`.
pub async fn deliver<T: PageTransport>(
    transport: &T,
    tab: TabId,
    message: PageMessage,
    deadline: Duration,
) -> Result<PageReply, SearchError> {
    match tokio::time::timeout(deadline, transport.send(tab, message)).await {
        Ok(reply) => reply,
        Err(_) => Err(SearchError::Timeout(format!(
            "tab {tab} did not answer within {}ms",
            deadline.as_millis()
        ))),
    }
}

/// Send a search request to every candidate concurrently.
///
/// Waits for every outcome; one candidate failing never cancels the others.
/// The returned vector is in candidate order.
pub async fn dispatch_search<T: PageTransport>(
    transport: &T,
    candidates: &[TabCandidate],
    query: &str,
    search_id: u64,
    deadline: Duration,
) -> Vec<Dispatch> {
    let futures = candidates.iter().map(|tab| {
        let message = PageMessage::Search {
            search_query: query.to_owned(),
            search_id,
        };
        deliver(transport, tab.id, message, deadline)
    });

    futures::future::join_all(futures)
        .await
        .into_iter()
        .map(|outcome| match outcome {
            Ok(PageReply::Search(response)) => Dispatch::Replied(response),
            Ok(PageReply::Ack) => Dispatch::Unreachable(SearchError::Parse(
                "page acknowledged a search without results".into(),
            )),
            Err(err) => Dispatch::Unreachable(err),
        })
        .collect()
}

/// Ping every candidate concurrently and return the ids that did not answer.
pub async fn unresponsive<T: PageTransport>(
    transport: &T,
    candidates: &[TabCandidate],
    deadline: Duration,
) -> Vec<TabId> {
    let futures = candidates.iter().map(|tab| async move {
        let outcome = deliver(transport, tab.id, PageMessage::CheckScriptStatus, deadline).await;
        (tab.id, outcome)
    });

    futures::future::join_all(futures)
        .await
        .into_iter()
        .filter_map(|(id, outcome)| match outcome {
            Ok(_) => None,
            Err(err) => {
                tracing::debug!(tab = id, error = %err, "page did not answer status ping");
                Some(id)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tab 1 answers, tab 2 has no listener, tab 3 never answers.
    struct MixedTransport;

    impl PageTransport for MixedTransport {
        async fn send(&self, tab: TabId, message: PageMessage) -> Result<PageReply, SearchError> {
            match tab {
                1 => match message {
                    PageMessage::Search { search_id, .. } => Ok(PageReply::Search(SearchResponse {
                        search_id,
                        results: vec![],
                        match_found_anywhere: true,
                        relevance_score: 1.0,
                    })),
                    _ => Ok(PageReply::Ack),
                },
                2 => Err(SearchError::Transport("no receiving end".into())),
                _ => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(PageReply::Ack)
                }
            }
        }
    }

    fn tabs(ids: &[TabId]) -> Vec<TabCandidate> {
        ids.iter()
            .map(|&id| TabCandidate {
                id,
                url: format!("https://tab{id}.test"),
                title: format!("Tab {id}"),
                window_id: 1,
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn outcomes_are_in_candidate_order() {
        let outcomes = dispatch_search(
            &MixedTransport,
            &tabs(&[3, 1, 2]),
            "q",
            7,
            Duration::from_millis(100),
        )
        .await;
        assert_eq!(outcomes.len(), 3);
        assert!(matches!(outcomes[0], Dispatch::Unreachable(SearchError::Timeout(_))));
        assert!(matches!(&outcomes[1], Dispatch::Replied(r) if r.search_id == 7));
        assert!(matches!(outcomes[2], Dispatch::Unreachable(SearchError::Transport(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn unresponsive_lists_failed_and_silent_tabs() {
        let silent = unresponsive(&MixedTransport, &tabs(&[1, 2, 3]), Duration::from_millis(50)).await;
        assert_eq!(silent, vec![2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_message_names_tab() {
        let err = deliver(
            &MixedTransport,
            9,
            PageMessage::CheckScriptStatus,
            Duration::from_millis(10),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("tab 9"));
    }
}
