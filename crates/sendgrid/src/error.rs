use mailroom_provider::ProviderError;
use thiserror::Error;

/// Errors specific to the `SendGrid` transport.
///
/// These are internal errors that get converted into [`ProviderError`] at the
/// public API boundary.
#[derive(Debug, Error)]
pub enum SendGridError {
    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The `SendGrid` API returned a non-success response.
    #[error("SendGrid API error: {0}")]
    Api(String),

    /// The message is missing fields the requested send mode needs.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// The transport received an HTTP 429 (Too Many Requests) response.
    #[error("rate limited by SendGrid")]
    RateLimited,
}

impl From<SendGridError> for ProviderError {
    fn from(err: SendGridError) -> Self {
        match err {
            SendGridError::Http(e) => ProviderError::Connection(e.to_string()),
            SendGridError::Api(msg) => ProviderError::ExecutionFailed(msg),
            SendGridError::InvalidMessage(msg) => ProviderError::Configuration(msg),
            SendGridError::RateLimited => ProviderError::RateLimited,
        }
    }
}
