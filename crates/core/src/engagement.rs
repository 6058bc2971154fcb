use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One engagement-tracking row, recorded after a successful send of an
/// event that participates in re-engagement measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementRecord {
    /// Account the message went to.
    pub user_id: String,
    /// Snake-case event name (e.g. `"inactivity_warning"`).
    pub email_type: String,
    /// Caller-supplied token correlating this send with later user activity.
    pub engagement_token: String,
    /// When the message was sent.
    pub sent_at: DateTime<Utc>,
}

impl EngagementRecord {
    /// Create a record stamped with the current time.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        email_type: impl Into<String>,
        engagement_token: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email_type: email_type.into(),
            engagement_token: engagement_token.into(),
            sent_at: Utc::now(),
        }
    }

    /// Sort-key form used by composite-key stores.
    #[must_use]
    pub fn sort_key(&self) -> String {
        format!("{}:{}", self.email_type, self.engagement_token)
    }
}
