use mailroom_provider::ProviderError;
use thiserror::Error;

/// Errors specific to AWS backend operations.
#[derive(Debug, Error)]
pub enum AwsBackendError {
    /// The AWS SDK returned an error from the service.
    #[error("AWS service error: {0}")]
    ServiceError(String),

    /// The request was throttled by the AWS service.
    #[error("AWS request throttled")]
    Throttled,

    /// A network or connection error occurred communicating with AWS.
    #[error("AWS connection error: {0}")]
    Connection(String),

    /// The request timed out.
    #[error("AWS request timed out")]
    Timeout,
}

impl From<AwsBackendError> for ProviderError {
    fn from(err: AwsBackendError) -> Self {
        match err {
            AwsBackendError::ServiceError(msg) => ProviderError::ExecutionFailed(msg),
            AwsBackendError::Throttled => ProviderError::RateLimited,
            AwsBackendError::Connection(msg) => ProviderError::Connection(msg),
            AwsBackendError::Timeout => ProviderError::Timeout(std::time::Duration::from_secs(30)),
        }
    }
}

/// Classify an AWS SDK error string into the appropriate [`AwsBackendError`].
///
/// This helper inspects the error message for common patterns (throttling,
/// timeout, connection) and maps them to the correct variant.
pub fn classify_sdk_error(error_str: &str) -> AwsBackendError {
    let lower = error_str.to_lowercase();
    if lower.contains("throttl") || lower.contains("rate exceed") || lower.contains("too many") {
        AwsBackendError::Throttled
    } else if lower.contains("timeout") || lower.contains("timed out") {
        AwsBackendError::Timeout
    } else if lower.contains("connection")
        || lower.contains("connect")
        || lower.contains("dns")
        || lower.contains("network")
    {
        AwsBackendError::Connection(error_str.to_owned())
    } else {
        AwsBackendError::ServiceError(error_str.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttled_maps_to_rate_limited() {
        let err: ProviderError = AwsBackendError::Throttled.into();
        assert!(matches!(err, ProviderError::RateLimited));
        assert!(err.is_retryable());
    }

    #[test]
    fn timeout_maps_to_timeout() {
        let err: ProviderError = AwsBackendError::Timeout.into();
        assert!(matches!(err, ProviderError::Timeout(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn connection_maps_to_connection() {
        let err: ProviderError = AwsBackendError::Connection("reset".into()).into();
        assert!(matches!(err, ProviderError::Connection(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn service_error_maps_to_execution_failed() {
        let err: ProviderError = AwsBackendError::ServiceError("address not verified".into()).into();
        assert!(matches!(err, ProviderError::ExecutionFailed(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn classify_throttled() {
        let err = classify_sdk_error("Throttling: Rate exceeded");
        assert!(matches!(err, AwsBackendError::Throttled));
    }

    #[test]
    fn classify_timeout() {
        let err = classify_sdk_error("Request timed out after 30s");
        assert!(matches!(err, AwsBackendError::Timeout));
    }

    #[test]
    fn classify_connection() {
        let err = classify_sdk_error("Connection refused: localhost:4566");
        assert!(matches!(err, AwsBackendError::Connection(_)));
    }

    #[test]
    fn classify_generic_service_error() {
        let err = classify_sdk_error("MessageRejected: Email address is not verified");
        assert!(matches!(err, AwsBackendError::ServiceError(_)));
    }

    #[test]
    fn error_display() {
        assert_eq!(
            AwsBackendError::Throttled.to_string(),
            "AWS request throttled"
        );
        assert_eq!(AwsBackendError::Timeout.to_string(), "AWS request timed out");
        assert_eq!(
            AwsBackendError::ServiceError("bad".into()).to_string(),
            "AWS service error: bad"
        );
    }
}
