//! Host session: the open-tab registry plus the aggregator searching it.

use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tabscout_search::{
    Aggregator, DocumentSnapshot, SearchConfig, SnapshotTransport, TabCandidate,
};

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::host::contract::{
    CommandEnvelope, CommandName, ResponseEnvelope, SearchPayload, SelectPayload, TabOpenPayload,
    TabRefPayload,
};
use crate::store::JsonFileStore;
use crate::tabs::{RecentTabs, TabEvents, order_by_recency};

/// State behind one host connection.
///
/// Tabs are registered with their page snapshots through `tab.open`; searches
/// run over every registered tab, most recently used first.
#[derive(Debug)]
pub struct HostSession {
    aggregator: Aggregator<SnapshotTransport, JsonFileStore>,
    recent: RecentTabs<JsonFileStore>,
    tabs: Mutex<Vec<TabCandidate>>,
}

impl HostSession {
    /// Open a session using the configured store file.
    ///
    /// # Errors
    ///
    /// Returns an error if the search settings are invalid.
    pub fn new(config: &AppConfig) -> Result<Self> {
        Self::with_store(
            config.search.clone(),
            JsonFileStore::new(&config.storage.path),
        )
    }

    /// Open a session over an explicit store.
    ///
    /// # Errors
    ///
    /// Returns an error if `search` is invalid.
    pub fn with_store(search: SearchConfig, store: JsonFileStore) -> Result<Self> {
        let recent = RecentTabs::new(store.clone(), search.max_recent_tabs);
        let transport = SnapshotTransport::new(search.clone());
        let aggregator = Aggregator::new(transport, store, search)?;
        Ok(Self {
            aggregator,
            recent,
            tabs: Mutex::new(Vec::new()),
        })
    }

    /// The aggregator serving searches.
    pub fn aggregator(&self) -> &Aggregator<SnapshotTransport, JsonFileStore> {
        &self.aggregator
    }

    /// Registered tabs in the order they were opened.
    pub fn tabs(&self) -> Vec<TabCandidate> {
        self.tabs.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Run one command and build its response. Failures become error responses.
    pub async fn handle(&self, envelope: CommandEnvelope) -> ResponseEnvelope {
        let CommandEnvelope {
            request_id,
            command,
            payload,
            ..
        } = envelope;
        match self.dispatch(command, payload).await {
            Ok(payload) => ResponseEnvelope::ok(request_id, payload),
            Err(e) => {
                tracing::warn!(command = command.as_str(), error = %e, "host command failed");
                ResponseEnvelope::error(request_id, e.to_string())
            }
        }
    }

    async fn dispatch(&self, command: CommandName, payload: Value) -> Result<Value> {
        match command {
            CommandName::TabOpen => self.open_tab(parse_payload(command, payload)?).await,
            CommandName::TabClose => {
                let TabRefPayload { tab_id } = parse_payload(command, payload)?;
                let closed = self.aggregator.transport().unregister(tab_id);
                self.tabs
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .retain(|tab| tab.id != tab_id);
                self.recent.on_tab_removed(tab_id).await?;
                Ok(json!({ "closed": closed }))
            }
            CommandName::TabActivate => {
                let TabRefPayload { tab_id } = parse_payload(command, payload)?;
                self.recent.on_tab_activated(tab_id).await?;
                Ok(json!({ "tab_id": tab_id }))
            }
            CommandName::Search => {
                let SearchPayload {
                    query,
                    current_window,
                } = parse_payload(command, payload)?;
                let candidates = self.candidates_by_recency().await;
                let outcome = self
                    .aggregator
                    .search(&query, &candidates, current_window)
                    .await;
                Ok(serde_json::to_value(outcome)?)
            }
            CommandName::Select => {
                let SelectPayload { tab_id, query } = parse_payload(command, payload)?;
                self.aggregator.select(tab_id, &query).await?;
                self.recent.on_tab_activated(tab_id).await?;
                Ok(json!({ "tab_id": tab_id }))
            }
            CommandName::History => {
                let history = self.aggregator.history().await?;
                Ok(json!({ "history": history }))
            }
            CommandName::Probe => {
                let unresponsive = self.aggregator.probe(&self.tabs()).await;
                Ok(json!({ "unresponsive": unresponsive }))
            }
        }
    }

    async fn open_tab(&self, payload: TabOpenPayload) -> Result<Value> {
        let TabOpenPayload {
            tab_id,
            url,
            title,
            window_id,
            html,
            text,
        } = payload;

        let mut snapshot = match html {
            Some(html) => DocumentSnapshot::from_html(&url, &html),
            None => DocumentSnapshot::new(&url, "", text.unwrap_or_default()),
        };
        if let Some(title) = title {
            snapshot.title = title;
        }
        let candidate = TabCandidate {
            id: tab_id,
            url,
            title: snapshot.title.clone(),
            window_id,
        };
        tracing::debug!(tab = tab_id, chars = snapshot.visible_text.len(), "tab opened");

        self.aggregator.transport().register(tab_id, snapshot);
        {
            let mut tabs = self.tabs.lock().unwrap_or_else(|e| e.into_inner());
            match tabs.iter_mut().find(|tab| tab.id == tab_id) {
                Some(existing) => *existing = candidate,
                None => tabs.push(candidate),
            }
        }
        self.recent.on_tab_created(tab_id).await?;
        Ok(json!({ "tab_id": tab_id }))
    }

    /// Registered tabs, most recently used first. An unreadable recency list
    /// leaves the open order untouched.
    async fn candidates_by_recency(&self) -> Vec<TabCandidate> {
        let recent = match self.recent.recent().await {
            Ok(recent) => recent,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load recent tabs");
                Vec::new()
            }
        };
        order_by_recency(self.tabs(), &recent)
    }
}

fn parse_payload<T: DeserializeOwned>(command: CommandName, payload: Value) -> Result<T> {
    serde_json::from_value(payload)
        .map_err(|e| AppError::Protocol(format!("invalid {} payload: {e}", command.as_str())))
}
