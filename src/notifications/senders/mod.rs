use async_trait::async_trait;
use thiserror::Error;

use super::models::OutgoingMail;

pub mod smtp;

#[cfg(test)]
pub(crate) mod recording;

#[derive(Error, Debug)]
pub enum SenderError {
    #[error("Failed to send notification: {0}")]
    SendFailed(String),
    #[error("Invalid configuration for sender: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
}

/// A mail transport. Implementations own their connection settings and the
/// sender address.
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Dispatches `mail` and returns an identifier for the dispatched message.
    async fn send(&self, mail: &OutgoingMail) -> Result<String, SenderError>;
}
