use serde::{Deserialize, Serialize};

/// A business event that results in exactly one outbound e-mail.
///
/// Variants carry only the data the message needs. The mapping from variant
/// to template name, subject, fallback body, and variable map lives in
/// [`crate::catalog`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// First e-mail after account creation.
    Welcome {
        to: String,
        /// Parent's display name. Defaults to a generic greeting when absent.
        parent_name: Option<String>,
    },

    /// Scheduled warning that an idle account is approaching deletion.
    /// The only event that records an engagement-tracking row on success.
    InactivityWarning {
        to: String,
        user_id: String,
        days_inactive: u32,
        days_until_deletion: u32,
        /// Subscription tier at the time of the warning.
        tier: String,
        /// Token correlating this send with later user activity.
        engagement_token: String,
    },

    /// Last notice before an idle account is removed.
    DeletionWarning { to: String, days_until_deletion: u32 },

    /// Confirmation that an account and its stories were removed.
    DeletionConfirmation { to: String },

    /// An idle account was moved into hibernation.
    Hibernation { to: String },

    /// A hibernated or deactivated account is active again.
    AccountReactivated { to: String },

    /// Payment receipt.
    Receipt {
        to: String,
        /// Pre-formatted decimal amount, e.g. `"9.99"`.
        amount: String,
        /// ISO currency code. Defaults to `"USD"` when absent.
        currency: Option<String>,
        plan_name: String,
    },

    /// Invitation to join from an existing user.
    Invitation {
        to: String,
        inviter_name: String,
        invite_url: String,
    },

    /// Someone offered a story to this recipient.
    StoryTransferRequest {
        to: String,
        sender_name: String,
        story_title: String,
        accept_url: String,
    },

    /// Confirmation to the sender that a story transfer went out.
    StoryTransferSent {
        to: String,
        story_title: String,
        recipient_email: String,
    },

    /// The recipient accepted a story transfer.
    StoryTransferAccepted {
        to: String,
        story_title: String,
        recipient_name: String,
    },

    /// The recipient declined a story transfer.
    StoryTransferRejected {
        to: String,
        story_title: String,
        recipient_name: String,
    },

    /// Someone offered a character to this recipient.
    CharacterTransferRequest {
        to: String,
        sender_name: String,
        character_name: String,
        accept_url: String,
    },

    /// Confirmation to the sender that a character transfer went out.
    CharacterTransferSent {
        to: String,
        character_name: String,
        recipient_email: String,
    },

    /// The recipient accepted a character transfer.
    CharacterTransferAccepted {
        to: String,
        character_name: String,
        recipient_name: String,
    },

    /// The recipient declined a character transfer.
    CharacterTransferRejected {
        to: String,
        character_name: String,
        recipient_name: String,
    },

    /// A paid subscription started.
    SubscriptionStarted { to: String, plan_name: String },

    /// Plan change taking effect immediately.
    SubscriptionUpgraded {
        to: String,
        old_plan: String,
        new_plan: String,
    },

    /// Plan change scheduled for the end of the billing period.
    SubscriptionDowngraded {
        to: String,
        old_plan: String,
        new_plan: String,
        /// Date the lower plan takes effect, pre-formatted for display.
        effective_on: String,
    },

    /// Subscription canceled; access continues until the period ends.
    SubscriptionCanceled {
        to: String,
        plan_name: String,
        /// Last day of access, pre-formatted for display.
        access_until: String,
    },

    /// Successful renewal charge.
    SubscriptionRenewed {
        to: String,
        plan_name: String,
        /// Pre-formatted decimal amount, e.g. `"9.99"`.
        amount: String,
    },

    /// Free trial approaching its end.
    TrialEnding {
        to: String,
        /// Days remaining. Defaults to `3` when absent.
        days_left: Option<u32>,
    },

    /// A renewal or signup charge could not be processed.
    PaymentFailed {
        to: String,
        amount: String,
        update_url: String,
    },

    /// A requested account-data export finished.
    DataExportReady {
        to: String,
        download_url: String,
        /// Days until the download link expires. Defaults to `7` when absent.
        expires_in_days: Option<u32>,
    },

    /// Monthly activity summary for a parent.
    ParentInsight {
        to: String,
        child_name: String,
        stories_created: u32,
        reading_minutes: u32,
    },

    /// Service disruption announcement.
    SystemOutage { to: String, status_url: String },

    /// All-clear after a service disruption.
    SystemRestored { to: String },

    /// Nudge for an account that stopped creating stories.
    RetentionNudge {
        to: String,
        days_since_last_story: u32,
    },

    /// Story prompt suggestion for an active account.
    EngagementNudge { to: String, story_prompt: String },

    /// Discount offer for a lapsed account.
    WinBack {
        to: String,
        /// Percentage off. Defaults to `15` when absent.
        discount_percent: Option<u8>,
        promo_code: String,
    },
}

impl Notification {
    /// Recipient address for this event.
    #[must_use]
    pub fn recipient(&self) -> &str {
        match self {
            Self::Welcome { to, .. }
            | Self::InactivityWarning { to, .. }
            | Self::DeletionWarning { to, .. }
            | Self::DeletionConfirmation { to }
            | Self::Hibernation { to }
            | Self::AccountReactivated { to }
            | Self::Receipt { to, .. }
            | Self::Invitation { to, .. }
            | Self::StoryTransferRequest { to, .. }
            | Self::StoryTransferSent { to, .. }
            | Self::StoryTransferAccepted { to, .. }
            | Self::StoryTransferRejected { to, .. }
            | Self::CharacterTransferRequest { to, .. }
            | Self::CharacterTransferSent { to, .. }
            | Self::CharacterTransferAccepted { to, .. }
            | Self::CharacterTransferRejected { to, .. }
            | Self::SubscriptionStarted { to, .. }
            | Self::SubscriptionUpgraded { to, .. }
            | Self::SubscriptionDowngraded { to, .. }
            | Self::SubscriptionCanceled { to, .. }
            | Self::SubscriptionRenewed { to, .. }
            | Self::TrialEnding { to, .. }
            | Self::PaymentFailed { to, .. }
            | Self::DataExportReady { to, .. }
            | Self::ParentInsight { to, .. }
            | Self::SystemOutage { to, .. }
            | Self::SystemRestored { to }
            | Self::RetentionNudge { to, .. }
            | Self::EngagementNudge { to, .. }
            | Self::WinBack { to, .. } => to,
        }
    }

    /// Snake-case event name used in logs and engagement rows.
    #[must_use]
    pub fn email_type(&self) -> &'static str {
        match self {
            Self::Welcome { .. } => "welcome",
            Self::InactivityWarning { .. } => "inactivity_warning",
            Self::DeletionWarning { .. } => "deletion_warning",
            Self::DeletionConfirmation { .. } => "deletion_confirmation",
            Self::Hibernation { .. } => "hibernation",
            Self::AccountReactivated { .. } => "account_reactivated",
            Self::Receipt { .. } => "receipt",
            Self::Invitation { .. } => "invitation",
            Self::StoryTransferRequest { .. } => "story_transfer_request",
            Self::StoryTransferSent { .. } => "story_transfer_sent",
            Self::StoryTransferAccepted { .. } => "story_transfer_accepted",
            Self::StoryTransferRejected { .. } => "story_transfer_rejected",
            Self::CharacterTransferRequest { .. } => "character_transfer_request",
            Self::CharacterTransferSent { .. } => "character_transfer_sent",
            Self::CharacterTransferAccepted { .. } => "character_transfer_accepted",
            Self::CharacterTransferRejected { .. } => "character_transfer_rejected",
            Self::SubscriptionStarted { .. } => "subscription_started",
            Self::SubscriptionUpgraded { .. } => "subscription_upgraded",
            Self::SubscriptionDowngraded { .. } => "subscription_downgraded",
            Self::SubscriptionCanceled { .. } => "subscription_canceled",
            Self::SubscriptionRenewed { .. } => "subscription_renewed",
            Self::TrialEnding { .. } => "trial_ending",
            Self::PaymentFailed { .. } => "payment_failed",
            Self::DataExportReady { .. } => "data_export_ready",
            Self::ParentInsight { .. } => "parent_insight",
            Self::SystemOutage { .. } => "system_outage",
            Self::SystemRestored { .. } => "system_restored",
            Self::RetentionNudge { .. } => "retention_nudge",
            Self::EngagementNudge { .. } => "engagement_nudge",
            Self::WinBack { .. } => "win_back",
        }
    }

    /// Engagement-tracking identity `(user_id, token)` for events that
    /// record one.
    #[must_use]
    pub fn engagement(&self) -> Option<(&str, &str)> {
        match self {
            Self::InactivityWarning {
                user_id,
                engagement_token,
                ..
            } => Some((user_id, engagement_token)),
            _ => None,
        }
    }
}
