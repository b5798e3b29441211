use std::time::Duration;

use thiserror::Error;

/// Rejections raised before any address is processed.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("malformed request: {0}")]
    Malformed(String),
    #[error("emails must be an array")]
    NotAList,
    #[error("maximum {max} emails allowed per request, got {count}")]
    TooManyAddresses { count: usize, max: usize },
    #[error("rate limit exceeded ({limit} requests per window), retry in {}ms", .reset_in.as_millis())]
    RateLimited { limit: u32, reset_in: Duration },
}

impl BatchError {
    #[cfg(feature = "with-serde")]
    pub(crate) fn malformed(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// A fault inside one item's pipeline; converted into an invalid result.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("task panicked: {0}")]
    Panicked(String),
    #[error("task was cancelled")]
    Cancelled,
}

impl From<tokio::task::JoinError> for StageError {
    fn from(err: tokio::task::JoinError) -> Self {
        if !err.is_panic() {
            return Self::Cancelled;
        }
        let payload = err.into_panic();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Self::Panicked(message)
    }
}
