//! Error types for the remote store client
//!
//! Three failure families reach callers:
//! - transport failures (connection refused, DNS, TLS)
//! - non-2xx server responses carrying a human-readable message
//! - malformed response bodies
//!
//! Local precondition failures are caught before a request is built and
//! never reach the network.

/// Remote store error
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Network/transport failure before a response arrived
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-2xx response; `message` is surfaced to the user verbatim
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Message from the response body, or a generic fallback
        message: String,
    },

    /// Response arrived but the body did not parse
    #[error("malformed response body: {0}")]
    Decode(String),

    /// Local validation failed; no request was issued
    #[error("precondition failed: {0}")]
    Precondition(String),
}

impl StoreError {
    /// Whether the failure is plausibly transient (a retry by the caller
    /// could succeed). Nothing in this crate retries automatically.
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Message suitable for a user-facing notification
    #[inline]
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
