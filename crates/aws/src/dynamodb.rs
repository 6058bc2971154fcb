use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use mailroom_core::EngagementRecord;
use mailroom_provider::{EngagementStore, ProviderError};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::auth::build_sdk_config;
use crate::config::AwsBaseConfig;
use crate::error::classify_sdk_error;

/// Configuration for the `DynamoDB` engagement-tracking table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementTableConfig {
    /// Shared AWS configuration (region, role ARN, endpoint URL).
    #[serde(flatten)]
    pub aws: AwsBaseConfig,

    /// Name of the engagement table.
    pub table_name: String,
}

impl EngagementTableConfig {
    /// Create a new config for the given table and region.
    pub fn new(table_name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            aws: AwsBaseConfig::new(region),
            table_name: table_name.into(),
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

/// [`EngagementStore`] backed by a `DynamoDB` table with composite primary
/// key: `pk` is the user id, `sk` is `{email_type}:{engagement_token}`.
///
/// Rows are insert-only; this service never reads them back.
pub struct DynamoEngagementStore {
    config: EngagementTableConfig,
    client: aws_sdk_dynamodb::Client,
}

impl std::fmt::Debug for DynamoEngagementStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoEngagementStore")
            .field("config", &self.config)
            .field("client", &"<DynamoDbClient>")
            .finish()
    }
}

impl DynamoEngagementStore {
    /// Create a new `DynamoEngagementStore` by building an AWS SDK client.
    pub async fn new(config: EngagementTableConfig) -> Self {
        let sdk_config = build_sdk_config(&config.aws).await;
        let client = aws_sdk_dynamodb::Client::new(&sdk_config);
        Self { config, client }
    }

    /// Create a `DynamoEngagementStore` with a pre-built client (for testing).
    pub fn with_client(config: EngagementTableConfig, client: aws_sdk_dynamodb::Client) -> Self {
        Self { config, client }
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &EngagementTableConfig {
        &self.config
    }
}

#[async_trait]
impl EngagementStore for DynamoEngagementStore {
    async fn record(&self, record: &EngagementRecord) -> Result<(), ProviderError> {
        debug!(
            user_id = %record.user_id,
            email_type = %record.email_type,
            "recording engagement row"
        );

        self.client
            .put_item()
            .table_name(&self.config.table_name)
            .item("pk", AttributeValue::S(record.user_id.clone()))
            .item("sk", AttributeValue::S(record.sort_key()))
            .item("email_type", AttributeValue::S(record.email_type.clone()))
            .item(
                "engagement_token",
                AttributeValue::S(record.engagement_token.clone()),
            )
            .item("sent_at", AttributeValue::S(record.sent_at.to_rfc3339()))
            .send()
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                error!(error = %err_str, "DynamoDB put_item failed");
                ProviderError::from(classify_sdk_error(&err_str))
            })?;

        Ok(())
    }
}

/// Create the engagement table programmatically.
///
/// The table uses a composite primary key with `pk` (String) as the
/// partition key and `sk` (String) as the sort key. This is intended for
/// tests and local development; in production the table is provisioned via
/// Infrastructure-as-Code tooling.
///
/// # Errors
///
/// Returns an error if the `CreateTable` call fails for reasons other than
/// the table already existing.
pub async fn create_table(
    client: &aws_sdk_dynamodb::Client,
    table_name: &str,
) -> Result<(), aws_sdk_dynamodb::Error> {
    use aws_sdk_dynamodb::types::{
        AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput, ScalarAttributeType,
    };

    let result = client
        .create_table()
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name("pk")
                .key_type(KeyType::Hash)
                .build()
                .expect("valid key schema"),
        )
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name("sk")
                .key_type(KeyType::Range)
                .build()
                .expect("valid key schema"),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name("pk")
                .attribute_type(ScalarAttributeType::S)
                .build()
                .expect("valid attribute definition"),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name("sk")
                .attribute_type(ScalarAttributeType::S)
                .build()
                .expect("valid attribute definition"),
        )
        .provisioned_throughput(
            ProvisionedThroughput::builder()
                .read_capacity_units(5)
                .write_capacity_units(5)
                .build()
                .expect("valid throughput"),
        )
        .send()
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(err) => {
            // Tolerate "table already exists" errors so `create_table` is idempotent.
            let service_err = err.into_service_error();
            if service_err.is_resource_in_use_exception() {
                Ok(())
            } else {
                Err(service_err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_sets_table_and_region() {
        let config = EngagementTableConfig::new("engagement-tracking", "us-east-1");
        assert_eq!(config.table_name, "engagement-tracking");
        assert_eq!(config.aws.region, "us-east-1");
    }

    #[test]
    fn config_builder_chain() {
        let config = EngagementTableConfig::new("engagement-tracking", "us-east-1")
            .with_endpoint_url("http://localhost:8000")
            .with_role_arn("arn:aws:iam::123:role/dynamo-write");
        assert_eq!(
            config.aws.endpoint_url.as_deref(),
            Some("http://localhost:8000")
        );
        assert!(config.aws.role_arn.is_some());
    }

    #[test]
    fn config_serde_roundtrip() {
        let config = EngagementTableConfig::new("engagement-tracking", "us-west-2");
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EngagementTableConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.table_name, "engagement-tracking");
        assert_eq!(deserialized.aws.region, "us-west-2");
    }
}
