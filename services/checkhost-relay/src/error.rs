//! Error types for the relay service

/// Errors that can occur in the relay service
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("invalid proxy URL: {0}")]
    Proxy(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("check-host returned status {status}: {body}")]
    CheckHost { status: u16, body: String },

    #[error("Notifier error: {0}")]
    Notifier(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;
