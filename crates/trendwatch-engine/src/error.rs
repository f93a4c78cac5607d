use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("adapter '{platform}' failed: {message}")]
    Adapter { platform: String, message: String },

    #[error("adapter '{platform}' timed out")]
    AdapterTimeout { platform: String },

    #[error("lifecycle classification requires at least one volume sample")]
    InsufficientData,

    #[error("persistence failed: {0}")]
    Persistence(String),

    #[error("notification delivery failed: {0}")]
    Notification(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
