use thiserror::Error;

/// A failed tracking lookup. Every variant carries the container it was for.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    /// The tracking service answered with a non-success status.
    #[error("tracking service returned HTTP {status}: {body}")]
    Status {
        container: String,
        status: u16,
        body: String,
    },

    /// The request never produced a response (connect, timeout, TLS, ...).
    #[error("tracking request failed: {message}")]
    Transport { container: String, message: String },

    /// The response body was not a tracking payload.
    #[error("invalid tracking response: {message}")]
    Decode { container: String, message: String },
}

impl FetchError {
    pub fn container(&self) -> &str {
        match self {
            FetchError::Status { container, .. }
            | FetchError::Transport { container, .. }
            | FetchError::Decode { container, .. } => container,
        }
    }
}
