use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Failure to read the explorer registry.
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("Registry did not answer in time: {0}")]
    Timeout(String),

    #[error("Registry unreachable: {0}")]
    Network(String),

    #[error("Registry returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Registry rejected the query: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("Unreadable registry response: {0}")]
    Parse(String),
}

impl ExplorerError {
    /// Whether retrying the same request later may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ExplorerError::Timeout(_) | ExplorerError::Network(_) => true,
            ExplorerError::Api { status, .. } => *status == 429 || *status >= 500,
            ExplorerError::GraphQl(_) | ExplorerError::Parse(_) => false,
        }
    }
}

impl From<reqwest::Error> for ExplorerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExplorerError::Timeout(err.to_string())
        } else if err.is_decode() {
            ExplorerError::Parse(err.to_string())
        } else {
            ExplorerError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(err: serde_json::Error) -> Self {
        ExplorerError::Parse(err.to_string())
    }
}
