//! AWS service backends for the Mailroom notification dispatcher.
//!
//! This crate provides feature-gated integrations with AWS services:
//!
//! - **SES** (`ses` feature) — transactional e-mail via the `SESv2`
//!   `SendEmail` API
//! - **SSM** (`ssm` feature) — template-identifier lookup via Parameter Store
//! - **`DynamoDB`** (`dynamodb` feature) — insert-only engagement-tracking rows
//!
//! All backends share a common [`AwsBaseConfig`](config::AwsBaseConfig) for
//! region, endpoint override, and optional STS assume-role credentials.

pub mod auth;
pub mod config;
pub mod error;

#[cfg(feature = "ses")]
pub mod ses;

#[cfg(feature = "ssm")]
pub mod ssm;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

// Re-exports for convenience.
pub use config::AwsBaseConfig;
pub use error::AwsBackendError;

#[cfg(feature = "ses")]
pub use ses::{SesConfig, SesTransport};

#[cfg(feature = "ssm")]
pub use ssm::{SsmConfig, SsmParameterStore};

#[cfg(feature = "dynamodb")]
pub use dynamodb::{DynamoEngagementStore, EngagementTableConfig};
