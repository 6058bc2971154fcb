use async_trait::async_trait;
use dashmap::DashMap;
use mailroom_core::EngagementRecord;

use crate::error::ProviderError;
use crate::params::ParameterStore;
use crate::track::EngagementStore;

/// In-memory parameter store for local development and tests.
#[derive(Debug, Default)]
pub struct MemoryParameterStore {
    values: DashMap<String, String>,
}

impl MemoryParameterStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: DashMap::new(),
        }
    }

    /// Seed a parameter value.
    pub fn insert(&self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }
}

#[async_trait]
impl ParameterStore for MemoryParameterStore {
    async fn get(&self, name: &str) -> Result<Option<String>, ProviderError> {
        Ok(self.values.get(name).map(|entry| entry.value().clone()))
    }
}

/// In-memory engagement store keyed like the production composite-key table:
/// partition key `user_id`, sort key `{email_type}:{engagement_token}`.
#[derive(Debug, Default)]
pub struct MemoryEngagementStore {
    rows: DashMap<(String, String), EngagementRecord>,
}

impl MemoryEngagementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
        }
    }

    /// Number of stored rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the store has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Snapshot of all rows.
    #[must_use]
    pub fn rows(&self) -> Vec<EngagementRecord> {
        self.rows.iter().map(|entry| entry.value().clone()).collect()
    }
}

#[async_trait]
impl EngagementStore for MemoryEngagementStore {
    async fn record(&self, record: &EngagementRecord) -> Result<(), ProviderError> {
        self.rows
            .insert((record.user_id.clone(), record.sort_key()), record.clone());
        Ok(())
    }
}
