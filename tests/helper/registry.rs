//! Registry test utilities

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use tag_resolver::version::error::RegistryError;
use tag_resolver::version::registry::TagRegistry;
use tag_resolver::version::resolver::VersionResolver;
use tag_resolver::version::types::RepositoryIdentity;

/// Mock registry for testing
#[derive(Default)]
pub struct MockRegistry {
    tags: HashMap<String, Vec<String>>,
    failing: HashMap<String, String>,
    calls: AtomicUsize,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(mut self, repository: &str, tags: Vec<&str>) -> Self {
        self.tags.insert(
            repository.to_string(),
            tags.into_iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    /// Make listing `repository` fail with an unexpected-response error
    pub fn with_failure(mut self, repository: &str, message: &str) -> Self {
        self.failing
            .insert(repository.to_string(), message.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TagRegistry for MockRegistry {
    async fn fetch_all_tags(
        &self,
        repository: &RepositoryIdentity,
    ) -> Result<Vec<String>, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = repository.full_name();

        if let Some(message) = self.failing.get(&name) {
            return Err(RegistryError::InvalidResponse(message.clone()));
        }

        match self.tags.get(&name) {
            Some(tags) => Ok(tags.clone()),
            None => Err(RegistryError::NotFound(name)),
        }
    }
}

/// Registry that answers only after `delay`
pub struct SlowRegistry {
    pub delay: Duration,
}

#[async_trait]
impl TagRegistry for SlowRegistry {
    async fn fetch_all_tags(
        &self,
        _repository: &RepositoryIdentity,
    ) -> Result<Vec<String>, RegistryError> {
        tokio::time::sleep(self.delay).await;
        Ok(vec!["v1.0.0".to_string()])
    }
}

/// Create a resolver over the given registry, keeping a handle to the registry
pub fn create_test_resolver(registry: MockRegistry) -> (Arc<MockRegistry>, VersionResolver) {
    let registry = Arc::new(registry);
    let resolver = VersionResolver::new(registry.clone());
    (registry, resolver)
}
