//! Versioned host command/response envelopes and command payloads.
//!
//! One JSON object per line in each direction:
//!
//! ```json
//! {"v":1,"request_id":"7","command":"search","payload":{"query":"rust","current_window":1}}
//! {"v":1,"request_id":"7","ok":true,"payload":{"kind":"ranked",...},"error":null}
//! ```

use serde::{Deserialize, Serialize};
use tabscout_search::{TabId, WindowId};

/// Contract version for host command/response envelopes.
pub const CONTRACT_VERSION: u32 = 1;

/// Commands understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandName {
    #[serde(rename = "tab.open")]
    TabOpen,
    #[serde(rename = "tab.close")]
    TabClose,
    #[serde(rename = "tab.activate")]
    TabActivate,
    #[serde(rename = "search")]
    Search,
    #[serde(rename = "select")]
    Select,
    #[serde(rename = "history")]
    History,
    #[serde(rename = "probe")]
    Probe,
}

impl CommandName {
    /// Render command name to wire format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TabOpen => "tab.open",
            Self::TabClose => "tab.close",
            Self::TabActivate => "tab.activate",
            Self::Search => "search",
            Self::Select => "select",
            Self::History => "history",
            Self::Probe => "probe",
        }
    }

    /// Whether the command only reads tab state and may run alongside others.
    ///
    /// Searches in particular must overlap so that a newer query supersedes
    /// one still waiting on slow tabs.
    #[must_use]
    pub fn is_concurrent(self) -> bool {
        matches!(self, Self::Search | Self::History | Self::Probe)
    }
}

/// A versioned command envelope from frontend -> host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEnvelope {
    pub v: u32,
    pub request_id: String,
    pub command: CommandName,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl CommandEnvelope {
    /// Build a v1 command envelope.
    #[must_use]
    pub fn new(
        request_id: impl Into<String>,
        command: CommandName,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            v: CONTRACT_VERSION,
            request_id: request_id.into(),
            command,
            payload,
        }
    }

    /// Validate envelope version and required identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Protocol`](crate::AppError::Protocol) describing the problem.
    pub fn validate(&self) -> crate::Result<()> {
        if self.v != CONTRACT_VERSION {
            return Err(crate::AppError::Protocol(format!(
                "unsupported contract version {}; expected {CONTRACT_VERSION}",
                self.v
            )));
        }
        if self.request_id.trim().is_empty() {
            return Err(crate::AppError::Protocol(
                "request_id cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

/// A versioned response envelope from host -> frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub v: u32,
    pub request_id: String,
    pub ok: bool,
    pub payload: serde_json::Value,
    pub error: Option<String>,
}

impl ResponseEnvelope {
    /// Build a successful response envelope.
    #[must_use]
    pub fn ok(request_id: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            v: CONTRACT_VERSION,
            request_id: request_id.into(),
            ok: true,
            payload,
            error: None,
        }
    }

    /// Build an error response envelope.
    #[must_use]
    pub fn error(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            v: CONTRACT_VERSION,
            request_id: request_id.into(),
            ok: false,
            payload: serde_json::Value::Null,
            error: Some(message.into()),
        }
    }
}

/// Payload of `tab.open`: a tab and the page it shows.
///
/// Page text comes from `html` when given, otherwise from `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabOpenPayload {
    pub tab_id: TabId,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub window_id: WindowId,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Payload of `tab.close` and `tab.activate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRefPayload {
    pub tab_id: TabId,
}

/// Payload of `search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPayload {
    pub query: String,
    #[serde(default)]
    pub current_window: Option<WindowId>,
}

/// Payload of `select`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectPayload {
    pub tab_id: TabId,
    pub query: String,
}
