use async_trait::async_trait;

use crate::error::ProviderError;

/// Read-only access to a remote parameter store.
///
/// `Ok(None)` means the parameter does not exist; `Err` means the lookup
/// itself failed. Callers that treat both the same way (the template
/// resolver does) still get the distinction for logging.
#[async_trait]
pub trait ParameterStore: Send + Sync + std::fmt::Debug {
    /// Fetch a parameter value by exact name.
    async fn get(&self, name: &str) -> Result<Option<String>, ProviderError>;
}
