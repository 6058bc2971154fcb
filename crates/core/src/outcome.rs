use std::fmt;

use serde::{Deserialize, Serialize};

/// The provider a message was handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Marketing provider (remote templates, raw-content sends).
    Sendgrid,
    /// Transactional provider (inline subject + body only).
    Ses,
}

impl ProviderKind {
    /// Stable identifier used in logs and serialized outcomes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sendgrid => "sendgrid",
            Self::Ses => "ses",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a successful dispatch. Failure is carried by the `Result`
/// wrapping this type, so the only payload is which provider delivered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchOutcome {
    /// Provider that delivered the message.
    pub provider: ProviderKind,
}

impl DispatchOutcome {
    /// Outcome for a message delivered by `provider`.
    #[must_use]
    pub fn delivered_by(provider: ProviderKind) -> Self {
        Self { provider }
    }
}
