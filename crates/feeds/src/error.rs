//! Error types for bank feed operations.

use thiserror::Error;

/// Errors that can occur while fetching from the bank API.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Bank API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("Currency table lacks USD/EUR buy and sell quotes")]
    MissingRate,
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Timeout(err.to_string())
        } else if err.is_decode() {
            FeedError::Malformed(err.to_string())
        } else {
            FeedError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Malformed(err.to_string())
    }
}

impl FeedError {
    /// Returns true if this error is transient and likely to succeed on a later cycle.
    pub fn is_transient(&self) -> bool {
        match self {
            FeedError::Request(_) | FeedError::Timeout(_) | FeedError::RateLimited => true,
            FeedError::Status { status, .. } => *status >= 500,
            FeedError::Malformed(_) | FeedError::MissingRate => false,
        }
    }
}
