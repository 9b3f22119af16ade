//! Error types for the tabscout-search crate.
//!
//! Messages are stable strings suitable for display and logging. Page text
//! and query strings never appear in error messages.

/// Errors that can occur while searching open tabs.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A message could not be delivered to a page (no listener, closed tab).
    #[error("transport error: {0}")]
    Transport(String),

    /// A page did not answer within the candidate deadline.
    #[error("page timed out: {0}")]
    Timeout(String),

    /// Reading or writing a persisted list failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A page reply or document could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Convenience type alias for tabscout-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_transport() {
        let err = SearchError::Transport("no receiving end for tab 7".into());
        assert_eq!(err.to_string(), "transport error: no receiving end for tab 7");
    }

    #[test]
    fn display_timeout() {
        let err = SearchError::Timeout("tab 3 exceeded 1500ms".into());
        assert_eq!(err.to_string(), "page timed out: tab 3 exceeded 1500ms");
    }

    #[test]
    fn display_storage() {
        let err = SearchError::Storage("history is not a list".into());
        assert_eq!(err.to_string(), "storage error: history is not a list");
    }

    #[test]
    fn display_config() {
        let err = SearchError::Config("max_snippets must be > 0".into());
        assert_eq!(err.to_string(), "config error: max_snippets must be > 0");
    }

    #[test]
    fn display_parse() {
        let err = SearchError::Parse("unexpected reply".into());
        assert_eq!(err.to_string(), "parse error: unexpected reply");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
