use async_trait::async_trait;
use mailroom_provider::{ParameterStore, ProviderError};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::auth::build_sdk_config;
use crate::config::AwsBaseConfig;
use crate::error::classify_sdk_error;

/// Configuration for the SSM Parameter Store backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsmConfig {
    /// Shared AWS configuration (region, role ARN, endpoint URL).
    #[serde(flatten)]
    pub aws: AwsBaseConfig,
}

impl SsmConfig {
    /// Create a new `SsmConfig` with the given AWS region.
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

/// [`ParameterStore`] backed by AWS SSM Parameter Store.
///
/// Values are fetched with decryption enabled so `SecureString` parameters
/// work transparently. A missing parameter is `Ok(None)`, not an error.
pub struct SsmParameterStore {
    config: SsmConfig,
    client: aws_sdk_ssm::Client,
}

impl std::fmt::Debug for SsmParameterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsmParameterStore")
            .field("config", &self.config)
            .field("client", &"<SsmClient>")
            .finish()
    }
}

impl SsmParameterStore {
    /// Create a new `SsmParameterStore` by building an AWS SDK client.
    pub async fn new(config: SsmConfig) -> Self {
        let sdk_config = build_sdk_config(&config.aws).await;
        let client = aws_sdk_ssm::Client::new(&sdk_config);
        Self { config, client }
    }

    /// Create a `SsmParameterStore` with a pre-built client (for testing).
    pub fn with_client(config: SsmConfig, client: aws_sdk_ssm::Client) -> Self {
        Self { config, client }
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &SsmConfig {
        &self.config
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn get(&self, name: &str) -> Result<Option<String>, ProviderError> {
        debug!(parameter = %name, "fetching SSM parameter");

        let result = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await;

        match result {
            Ok(output) => Ok(output
                .parameter()
                .and_then(|p| p.value())
                .map(ToOwned::to_owned)),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_parameter_not_found() {
                    debug!(parameter = %name, "SSM parameter not found");
                    return Ok(None);
                }
                let err_str = service_err.to_string();
                error!(parameter = %name, error = %err_str, "SSM get_parameter failed");
                Err(classify_sdk_error(&err_str).into())
            }
        }
    }
}
