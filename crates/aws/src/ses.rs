use async_trait::async_trait;
use mailroom_core::{EmailMessage, ProviderKind};
use mailroom_provider::{EmailTransport, ProviderError, SendReceipt};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::auth::build_sdk_config;
use crate::config::AwsBaseConfig;
use crate::error::classify_sdk_error;

/// Configuration for the AWS SES transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SesConfig {
    /// Shared AWS configuration (region, role ARN, endpoint URL).
    #[serde(flatten)]
    pub aws: AwsBaseConfig,
}

impl SesConfig {
    /// Create a new `SesConfig` with the given AWS region.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            aws: AwsBaseConfig::new(region),
        }
    }

    /// Set the endpoint URL override (for `LocalStack`).
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.aws.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Set the IAM role ARN to assume.
    #[must_use]
    pub fn with_role_arn(mut self, role_arn: impl Into<String>) -> Self {
        self.aws.role_arn = Some(role_arn.into());
        self
    }
}

/// Transactional e-mail transport backed by the `SESv2` `SendEmail` API.
///
/// Sends inline subject + body content only; template fields on the message
/// are ignored entirely. Remote templating is the marketing transport's job.
pub struct SesTransport {
    config: SesConfig,
    client: aws_sdk_sesv2::Client,
}

impl std::fmt::Debug for SesTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SesTransport")
            .field("config", &self.config)
            .field("client", &"<SesV2Client>")
            .finish()
    }
}

impl SesTransport {
    /// Create a new `SesTransport` by building an AWS SDK client.
    pub async fn new(config: SesConfig) -> Self {
        let sdk_config = build_sdk_config(&config.aws).await;
        let client = aws_sdk_sesv2::Client::new(&sdk_config);
        Self { config, client }
    }

    /// Create a `SesTransport` with a pre-built client (for testing).
    pub fn with_client(config: SesConfig, client: aws_sdk_sesv2::Client) -> Self {
        Self { config, client }
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &SesConfig {
        &self.config
    }

    fn content(data: &str) -> Result<aws_sdk_sesv2::types::Content, ProviderError> {
        aws_sdk_sesv2::types::Content::builder()
            .data(data)
            .charset("UTF-8")
            .build()
            .map_err(|e| ProviderError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl EmailTransport for SesTransport {
    async fn send(&self, message: &EmailMessage) -> Result<SendReceipt, ProviderError> {
        let Some(from) = message.from.as_deref() else {
            return Err(ProviderError::Configuration(
                "sender address missing".into(),
            ));
        };
        let subject = message.subject.as_deref().unwrap_or("");

        debug!(from = %from, to = %message.to, subject = %subject, "sending email via SES");

        let destination = aws_sdk_sesv2::types::Destination::builder()
            .to_addresses(&message.to)
            .build();

        let mut body_builder = aws_sdk_sesv2::types::Body::builder();
        if let Some(text) = message.text_body.as_deref() {
            body_builder = body_builder.text(Self::content(text)?);
        }
        if let Some(html) = message.html_body.as_deref() {
            body_builder = body_builder.html(Self::content(html)?);
        }

        let ses_message = aws_sdk_sesv2::types::Message::builder()
            .subject(Self::content(subject)?)
            .body(body_builder.build())
            .build();

        let email_content = aws_sdk_sesv2::types::EmailContent::builder()
            .simple(ses_message)
            .build();

        let result = self
            .client
            .send_email()
            .from_email_address(from)
            .destination(destination)
            .content(email_content)
            .send()
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                error!(error = %err_str, "SES send_email failed");
                let err: ProviderError = classify_sdk_error(&err_str).into();
                err
            })?;

        let message_id = result.message_id().map(ToOwned::to_owned);
        info!(message_id = message_id.as_deref().unwrap_or("unknown"), "SES email sent");

        Ok(SendReceipt {
            message_id,
            status: "sent".into(),
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        debug!("performing SES health check");
        self.client.get_account().send().await.map_err(|e| {
            error!(error = %e, "SES health check failed");
            ProviderError::Connection(format!("SES health check failed: {e}"))
        })?;
        Ok(())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Ses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_new_sets_region() {
        let config = SesConfig::new("us-east-1");
        assert_eq!(config.aws.region, "us-east-1");
        assert!(config.aws.endpoint_url.is_none());
    }

    #[test]
    fn config_builder_chain() {
        let config = SesConfig::new("eu-west-1")
            .with_endpoint_url("http://localhost:4566")
            .with_role_arn("arn:aws:iam::123:role/ses");
        assert_eq!(config.aws.region, "eu-west-1");
        assert!(config.aws.endpoint_url.is_some());
        assert!(config.aws.role_arn.is_some());
    }

    #[test]
    fn config_debug_redacts_role_arn() {
        let config = SesConfig::new("us-east-1").with_role_arn("arn:aws:iam::123:role/test");
        let debug = format!("{config:?}");
        assert!(debug.contains("SesConfig"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn config_serde_roundtrip() {
        let config = SesConfig::new("us-west-2").with_endpoint_url("http://localhost:4566");

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SesConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.aws.region, "us-west-2");
        assert_eq!(
            deserialized.aws.endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
    }
}
