use thiserror::Error;

#[derive(Error, Debug)]
pub enum WikiGateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
