//! Recent-tab tracking.
//!
//! Activating or creating a tab moves it to the front of a persisted,
//! bounded list; removing a tab drops it. Searches present candidates in
//! that order, so equally scored tabs rank by how recently they were used.

use std::future::Future;

use tabscout_search::history::RecentList;
use tabscout_search::store::RECENT_TABS_KEY;
use tabscout_search::{ListStore, TabCandidate, TabId};
use tokio::sync::Mutex;

use crate::error::Result;

/// Browser tab lifecycle notifications.
pub trait TabEvents: Send + Sync {
    /// The user switched to `tab`.
    fn on_tab_activated(&self, tab: TabId) -> impl Future<Output = Result<()>> + Send;

    /// `tab` was opened.
    fn on_tab_created(&self, tab: TabId) -> impl Future<Output = Result<()>> + Send;

    /// `tab` was closed.
    fn on_tab_removed(&self, tab: TabId) -> impl Future<Output = Result<()>> + Send;
}

/// Most-recently-used tab ids, persisted under `recentTabs`.
#[derive(Debug)]
pub struct RecentTabs<S> {
    store: S,
    capacity: usize,
    update: Mutex<()>,
}

impl<S: ListStore> RecentTabs<S> {
    /// Track at most `capacity` tabs in `store`.
    pub fn new(store: S, capacity: usize) -> Self {
        Self {
            store,
            capacity,
            update: Mutex::new(()),
        }
    }

    /// Tab ids, most recently used first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Search`](crate::AppError::Search) if the list cannot be loaded.
    pub async fn recent(&self) -> Result<Vec<TabId>> {
        let mut ids: Vec<TabId> = self.store.load(RECENT_TABS_KEY).await?;
        ids.truncate(self.capacity);
        Ok(ids)
    }

    /// Load, modify and save the list. `edit` returns whether it changed anything.
    async fn modify<F>(&self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut RecentList<TabId>) -> bool + Send,
    {
        let _guard = self.update.lock().await;
        let stored: Vec<TabId> = self.store.load(RECENT_TABS_KEY).await?;
        let mut list = RecentList::from_vec(stored, self.capacity);
        if edit(&mut list) {
            self.store.save(RECENT_TABS_KEY, list.as_slice()).await?;
        }
        Ok(())
    }
}

impl<S: ListStore> TabEvents for RecentTabs<S> {
    async fn on_tab_activated(&self, tab: TabId) -> Result<()> {
        tracing::debug!(tab, "tab activated");
        self.modify(|list| {
            list.touch(tab);
            true
        })
        .await
    }

    async fn on_tab_created(&self, tab: TabId) -> Result<()> {
        tracing::debug!(tab, "tab created");
        self.modify(|list| {
            list.touch(tab);
            true
        })
        .await
    }

    async fn on_tab_removed(&self, tab: TabId) -> Result<()> {
        tracing::debug!(tab, "tab removed");
        self.modify(|list| list.remove_by(|id| *id == tab)).await
    }
}

/// Put tabs listed in `recent` first, in that order, followed by the rest in
/// their original order. Ids in `recent` with no candidate are skipped.
pub fn order_by_recency(candidates: Vec<TabCandidate>, recent: &[TabId]) -> Vec<TabCandidate> {
    let mut rest = candidates;
    let mut ordered = Vec::with_capacity(rest.len());
    for id in recent {
        if let Some(pos) = rest.iter().position(|tab| tab.id == *id) {
            ordered.push(rest.remove(pos));
        }
    }
    ordered.extend(rest);
    ordered
}
