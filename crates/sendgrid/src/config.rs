/// Configuration for the `SendGrid` transport.
#[derive(Clone)]
pub struct SendGridConfig {
    /// API key used as the bearer token.
    pub api_key: String,

    /// Base URL for the `SendGrid` v3 API. Override this for testing
    /// against a mock server.
    pub api_base_url: String,
}

impl std::fmt::Debug for SendGridConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendGridConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl SendGridConfig {
    /// Create a new configuration with the given API key.
    ///
    /// Uses the default `SendGrid` v3 API base URL
    /// (`https://api.sendgrid.com/v3`).
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: "https://api.sendgrid.com/v3".to_owned(),
        }
    }

    /// Override the API base URL (useful for testing).
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = SendGridConfig::new("SG.test-key");
        assert_eq!(config.api_key, "SG.test-key");
        assert_eq!(config.api_base_url, "https://api.sendgrid.com/v3");
    }

    #[test]
    fn with_api_base_url() {
        let config = SendGridConfig::new("key").with_api_base_url("http://localhost:9999");
        assert_eq!(config.api_base_url, "http://localhost:9999");
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = SendGridConfig::new("SG.super-secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }
}
