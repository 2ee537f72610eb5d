//! Repository classification and the per-repository resolver cache.

use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::errors::{Error, GeneratorResult};
use crate::layout::{LayoutConfig, LayoutConventions, LayoutStrategy};
use crate::layout_resolver::LayoutResolver;

#[cfg(test)]
#[path = "layout_registry_tests.rs"]
mod tests;

/// Maps repository names to layout strategies.
///
/// Resolvers are built lazily on first use and kept for the lifetime of the
/// registry. Classification depends only on the repository name, so entries
/// never go stale.
#[derive(Debug)]
pub struct LayoutRegistry {
    conventions: LayoutConventions,
    split_name: Regex,
    cache: Mutex<HashMap<String, Arc<LayoutResolver>>>,
}

impl LayoutRegistry {
    /// # Errors
    ///
    /// * `Error::InvalidLayoutPattern` - the split prefix produces an invalid
    ///   classification pattern
    pub fn new(conventions: LayoutConventions) -> GeneratorResult<Self> {
        let pattern = format!("^{}-.+-.+$", regex::escape(&conventions.split_prefix));
        let split_name = Regex::new(&pattern).map_err(|e| Error::InvalidLayoutPattern {
            pattern,
            reason: e.to_string(),
        })?;

        Ok(Self {
            conventions,
            split_name,
            cache: Mutex::new(HashMap::new()),
        })
    }

    pub fn conventions(&self) -> &LayoutConventions {
        &self.conventions
    }

    /// Picks the layout for `repository`. The first matching rule wins:
    ///
    /// 1. `<prefix>-<env>-<cluster>` is split-by-env
    /// 2. names starting with the monorepo name are monorepo
    /// 3. anything else is a business app
    pub fn classify(&self, repository: &str) -> LayoutConfig {
        if self.split_name.is_match(repository) {
            LayoutConfig::split_by_env(&self.conventions.split_prefix)
        } else if repository.starts_with(&self.conventions.monorepo_name) {
            LayoutConfig::monorepo(self.conventions.monorepo_cluster.clone())
        } else {
            LayoutConfig::business_app()
        }
    }

    /// Returns the cached resolver for `repository`, building it on first use.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidLayoutPattern` - the classified layout does not compile
    pub fn resolver_for(&self, repository: &str) -> GeneratorResult<Arc<LayoutResolver>> {
        if let Some(resolver) = self.lock().get(repository) {
            return Ok(Arc::clone(resolver));
        }

        let config = self.classify(repository);
        let resolver = Arc::new(LayoutResolver::from_config(&config)?);
        debug!(
            repository = repository,
            strategy = %config.strategy,
            "Registered layout resolver"
        );

        // Another request may have raced us here; keep whichever was first.
        let mut cache = self.lock();
        let entry = cache
            .entry(repository.to_string())
            .or_insert_with(|| Arc::clone(&resolver));
        Ok(Arc::clone(entry))
    }

    /// Strategy the registry assigns to `repository`.
    pub fn strategy_for(&self, repository: &str) -> LayoutStrategy {
        self.classify(repository).strategy
    }

    /// Number of repositories with a cached resolver.
    pub fn cached_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<LayoutResolver>>> {
        // The map holds only immutable resolvers, so a poisoned lock is still usable.
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
