/// Configuration for the [`Mailer`](crate::Mailer), built once at startup.
///
/// All knobs live here so nothing deeper in the stack reads the environment.
#[derive(Clone)]
pub struct MailerConfig {
    /// Deployment environment (`development`, `staging`, `production`).
    /// Embedded in the parameter paths used for template resolution.
    pub environment: String,
    /// Default sender address stamped onto every outgoing message.
    pub sender: String,
    /// Application base URL used to build links in fallback bodies.
    pub app_url: String,
    /// SendGrid API key. Absent means the marketing provider is disabled
    /// and everything goes out through the transactional provider.
    pub sendgrid_api_key: Option<String>,
    /// AWS region for the SES, SSM, and DynamoDB clients.
    pub aws_region: String,
    /// DynamoDB table for engagement tracking. Absent disables tracking.
    pub engagement_table: Option<String>,
}

impl std::fmt::Debug for MailerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailerConfig")
            .field("environment", &self.environment)
            .field("sender", &self.sender)
            .field("app_url", &self.app_url)
            .field(
                "sendgrid_api_key",
                &self.sendgrid_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("aws_region", &self.aws_region)
            .field("engagement_table", &self.engagement_table)
            .finish()
    }
}

impl MailerConfig {
    /// Create a configuration with the given sender and application URL and
    /// defaults for everything else.
    pub fn new(sender: impl Into<String>, app_url: impl Into<String>) -> Self {
        Self {
            environment: "development".into(),
            sender: sender.into(),
            app_url: app_url.into(),
            sendgrid_api_key: None,
            aws_region: "us-east-1".into(),
            engagement_table: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `MAILROOM_ENV` (default `development`)
    /// - `MAILROOM_SENDER` (default `hello@storytailor.com`)
    /// - `MAILROOM_APP_URL` (default `https://app.storytailor.com`)
    /// - `SENDGRID_API_KEY` (optional; absent or empty disables SendGrid)
    /// - `AWS_REGION` (default `us-east-1`)
    /// - `MAILROOM_ENGAGEMENT_TABLE` (optional; absent disables tracking)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            environment: var("MAILROOM_ENV").unwrap_or_else(|| "development".to_string()),
            sender: var("MAILROOM_SENDER").unwrap_or_else(|| "hello@storytailor.com".to_string()),
            app_url: var("MAILROOM_APP_URL")
                .unwrap_or_else(|| "https://app.storytailor.com".to_string()),
            sendgrid_api_key: var("SENDGRID_API_KEY").filter(|key| !key.is_empty()),
            aws_region: var("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            engagement_table: var("MAILROOM_ENGAGEMENT_TABLE"),
        }
    }

    /// Override the deployment environment.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Set the SendGrid API key, enabling the marketing provider.
    #[must_use]
    pub fn with_sendgrid_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.sendgrid_api_key = Some(api_key.into());
        self
    }

    /// Override the AWS region.
    #[must_use]
    pub fn with_aws_region(mut self, region: impl Into<String>) -> Self {
        self.aws_region = region.into();
        self
    }

    /// Set the engagement-tracking table, enabling tracking writes.
    #[must_use]
    pub fn with_engagement_table(mut self, table: impl Into<String>) -> Self {
        self.engagement_table = Some(table.into());
        self
    }

    /// Whether the marketing provider can be used at all.
    #[must_use]
    pub fn marketing_enabled(&self) -> bool {
        self.sendgrid_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn new_defaults() {
        let config = MailerConfig::new("hello@storytailor.com", "https://app.storytailor.com");
        assert_eq!(config.environment, "development");
        assert_eq!(config.aws_region, "us-east-1");
        assert!(config.sendgrid_api_key.is_none());
        assert!(config.engagement_table.is_none());
        assert!(!config.marketing_enabled());
    }

    #[test]
    fn builder_chain() {
        let config = MailerConfig::new("hello@storytailor.com", "https://app.storytailor.com")
            .with_environment("production")
            .with_sendgrid_api_key("SG.test-key")
            .with_aws_region("eu-west-1")
            .with_engagement_table("engagement-production");
        assert_eq!(config.environment, "production");
        assert_eq!(config.aws_region, "eu-west-1");
        assert_eq!(config.engagement_table.as_deref(), Some("engagement-production"));
        assert!(config.marketing_enabled());
    }

    #[test]
    fn lookup_reads_all_variables() {
        let vars: HashMap<&str, &str> = [
            ("MAILROOM_ENV", "staging"),
            ("MAILROOM_SENDER", "stories@storytailor.com"),
            ("MAILROOM_APP_URL", "https://staging.storytailor.com"),
            ("SENDGRID_API_KEY", "SG.staging-key"),
            ("AWS_REGION", "us-west-2"),
            ("MAILROOM_ENGAGEMENT_TABLE", "engagement-staging"),
        ]
        .into_iter()
        .collect();

        let config = MailerConfig::from_lookup(|key| vars.get(key).map(ToString::to_string));
        assert_eq!(config.environment, "staging");
        assert_eq!(config.sender, "stories@storytailor.com");
        assert_eq!(config.app_url, "https://staging.storytailor.com");
        assert_eq!(config.sendgrid_api_key.as_deref(), Some("SG.staging-key"));
        assert_eq!(config.aws_region, "us-west-2");
        assert_eq!(config.engagement_table.as_deref(), Some("engagement-staging"));
    }

    #[test]
    fn lookup_defaults_when_unset() {
        let config = MailerConfig::from_lookup(|_| None);
        assert_eq!(config.environment, "development");
        assert_eq!(config.sender, "hello@storytailor.com");
        assert_eq!(config.app_url, "https://app.storytailor.com");
        assert!(config.sendgrid_api_key.is_none());
        assert!(config.engagement_table.is_none());
    }

    #[test]
    fn empty_api_key_disables_marketing() {
        let config =
            MailerConfig::from_lookup(|key| (key == "SENDGRID_API_KEY").then(String::new));
        assert!(config.sendgrid_api_key.is_none());
        assert!(!config.marketing_enabled());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = MailerConfig::new("hello@storytailor.com", "https://app.storytailor.com")
            .with_sendgrid_api_key("SG.secret-key");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("SG.secret-key"));
    }
}
