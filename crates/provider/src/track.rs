use async_trait::async_trait;
use mailroom_core::EngagementRecord;

use crate::error::ProviderError;

/// Insert-only sink for engagement-tracking rows.
///
/// Rows are never read back by this service; downstream analytics joins
/// them against user activity.
#[async_trait]
pub trait EngagementStore: Send + Sync + std::fmt::Debug {
    /// Insert one tracking row.
    async fn record(&self, record: &EngagementRecord) -> Result<(), ProviderError>;
}
