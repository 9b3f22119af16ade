//! Error types for the tabscout host.

use tabscout_search::SearchError;

/// Top-level error type for the tabscout host.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the search layer (transport, storage, config).
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Malformed or unsupported host command.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_errors_pass_through_unchanged() {
        let err: AppError = SearchError::Storage("disk full".into()).into();
        assert_eq!(err.to_string(), "storage error: disk full");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().starts_with("I/O error"));
    }
}
