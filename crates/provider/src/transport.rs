use async_trait::async_trait;
use mailroom_core::{EmailMessage, ProviderKind};

use crate::error::ProviderError;

/// Result of a successful send as reported by the provider.
///
/// Receipts are consumed for logging; the dispatcher's public outcome only
/// records which provider delivered.
#[derive(Debug, Clone)]
pub struct SendReceipt {
    /// Provider-assigned message identifier (if available).
    pub message_id: Option<String>,
    /// Human-readable status (e.g. `"sent"`, `"queued"`).
    pub status: String,
}

/// Trait for pluggable e-mail delivery transports.
///
/// Implementations handle the actual provider API call; the dispatcher
/// decides which transport a message goes to and what happens on failure.
#[async_trait]
pub trait EmailTransport: Send + Sync + std::fmt::Debug {
    /// Deliver a message through this transport.
    async fn send(&self, message: &EmailMessage) -> Result<SendReceipt, ProviderError>;

    /// Verify the provider is reachable and usable.
    async fn health_check(&self) -> Result<(), ProviderError>;

    /// Which provider this transport talks to.
    fn kind(&self) -> ProviderKind;
}
