//! Outbound delivery to the operator's chat.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Telegram API error: {0}")]
    Api(#[from] teloxide::RequestError),
    #[error("Delivery rejected: {0}")]
    Rejected(String),
}

/// A chat bound to a fixed destination.
#[async_trait]
pub trait ChatSink: Send + Sync {
    /// Send one HTML-formatted message.
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError>;
}
