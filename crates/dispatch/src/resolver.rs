use std::sync::Arc;

use mailroom_provider::ParameterStore;
use tracing::{debug, warn};

use crate::cache::TemplateCache;

/// Resolves logical template names to provider template identifiers.
///
/// Identifiers live in the parameter store under two naming schemes: the
/// current one and a legacy one kept from a namespace migration. Both are
/// honored indefinitely; the current scheme always wins when both exist.
/// Resolved identifiers are cached, so each name costs at most one round of
/// remote lookups per process.
///
/// Resolution never fails. When neither path yields a value the caller falls
/// back to sending inline HTML instead of a remote template.
#[derive(Debug)]
pub struct TemplateResolver {
    store: Arc<dyn ParameterStore>,
    cache: TemplateCache,
    environment: String,
}

impl TemplateResolver {
    /// Create a resolver over the given parameter store with a
    /// process-lifetime cache.
    pub fn new(store: Arc<dyn ParameterStore>, environment: impl Into<String>) -> Self {
        Self {
            store,
            cache: TemplateCache::new(),
            environment: environment.into(),
        }
    }

    /// Replace the cache, e.g. with one whose entries expire.
    #[must_use]
    pub fn with_cache(mut self, cache: TemplateCache) -> Self {
        self.cache = cache;
        self
    }

    /// Parameter path under the current naming scheme.
    fn primary_path(&self, name: &str) -> String {
        format!("/{}/email/templates/sendgrid-{name}", self.environment)
    }

    /// Parameter path under the pre-migration naming scheme.
    fn legacy_path(&self, name: &str) -> String {
        format!(
            "/{}/email/sendgrid-templates/storytailor-{name}",
            self.environment
        )
    }

    /// Look up the provider template identifier for a logical template name
    /// (a renderer file name like `welcome.html`).
    pub async fn resolve(&self, name: &str) -> Option<String> {
        if let Some(id) = self.cache.get(name) {
            debug!(template = %name, "template identifier served from cache");
            return Some(id);
        }

        let primary = self.primary_path(name);
        match self.store.get(&primary).await {
            Ok(Some(id)) => {
                self.cache.insert(name, &id);
                return Some(id);
            }
            Ok(None) => {
                debug!(path = %primary, "no template parameter at current path");
            }
            Err(e) => {
                debug!(path = %primary, error = %e, "template lookup failed at current path");
            }
        }

        let legacy = self.legacy_path(name);
        match self.store.get(&legacy).await {
            Ok(Some(id)) => {
                self.cache.insert(name, &id);
                return Some(id);
            }
            Ok(None) => {}
            Err(e) => {
                debug!(path = %legacy, error = %e, "template lookup failed at legacy path");
            }
        }

        warn!(
            template = %name,
            primary = %primary,
            legacy = %legacy,
            "no template identifier found at either parameter path"
        );
        None
    }
}
