//! Version resolver
//!
//! Turns a repository and a version specifier into the concrete release tag
//! the specifier refers to, using the tags the repository has published.

use std::sync::Arc;

use tracing::{debug, info};

use crate::version::error::{RegistryError, ResolveError};
use crate::version::matcher::select_version;
use crate::version::registry::TagRegistry;
use crate::version::semver::{canonical_tag, parse_tags};
use crate::version::specifier::VersionSpecifier;
use crate::version::types::RepositoryIdentity;

/// Default branch name that resolves to the newest release
pub const DEFAULT_BRANCH: &str = "master";

/// Resolves version specifiers against a repository's published tags.
///
/// Holds no state between calls: every resolution lists the tags afresh, so
/// the resolver can be shared across tasks.
pub struct VersionResolver {
    registry: Arc<dyn TagRegistry>,
    default_branch: String,
}

impl VersionResolver {
    /// Create a resolver treating [`DEFAULT_BRANCH`] as the default branch
    pub fn new(registry: Arc<dyn TagRegistry>) -> Self {
        Self::with_default_branch(registry, DEFAULT_BRANCH)
    }

    pub fn with_default_branch(
        registry: Arc<dyn TagRegistry>,
        default_branch: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            default_branch: default_branch.into(),
        }
    }

    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    /// Resolve `specifier` to a tag in canonical `v<major>.<minor>.<patch>` form.
    ///
    /// # Errors
    /// * `InvalidSpecifier` - `specifier` is malformed; no request is made
    /// * `NotFound` - the repository does not exist or no tag satisfies `specifier`
    /// * `Transient` - the tag listing failed; the caller may retry
    pub async fn resolve(
        &self,
        identity: &RepositoryIdentity,
        specifier: &str,
    ) -> Result<String, ResolveError> {
        let parsed = VersionSpecifier::parse(specifier, &self.default_branch)?;

        let not_found = || ResolveError::NotFound {
            repository: identity.full_name(),
            specifier: specifier.to_string(),
        };

        if identity.owner.is_empty() || identity.project.is_empty() {
            return Err(not_found());
        }

        let tags = match self.registry.fetch_all_tags(identity).await {
            Ok(tags) => tags,
            Err(RegistryError::NotFound(_)) => return Err(not_found()),
            Err(e) => return Err(ResolveError::Transient(e)),
        };

        let versions = parse_tags(&tags);
        debug!(
            "{} of {} tags of {} are releases",
            versions.len(),
            tags.len(),
            identity
        );

        let selected = select_version(&parsed, &versions).ok_or_else(not_found)?;
        let tag = canonical_tag(selected);

        info!("Resolved {}@{} to {}", identity, specifier, tag);
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::registry::MockTagRegistry;
    use rstest::rstest;

    fn registry_with(tags: &'static [&'static str]) -> MockTagRegistry {
        let mut registry = MockTagRegistry::new();
        registry
            .expect_fetch_all_tags()
            .returning(move |_| Ok(tags.iter().map(|t| t.to_string()).collect()));
        registry
    }

    fn d3_bar() -> RepositoryIdentity {
        RepositoryIdentity::new("tj", "d3-bar")
    }

    #[rstest]
    #[case("1.6.x", "v1.6.3")]
    #[case("1.6", "v1.6.3")]
    #[case("1.x", "v1.8.0")]
    #[case("master", "v1.8.0")]
    #[case("1.8.0", "v1.8.0")]
    #[case("v1.8.0", "v1.8.0")]
    #[case("v1.6.0", "v1.6.0")]
    #[tokio::test]
    async fn resolve_returns_expected_tag(#[case] specifier: &str, #[case] expected: &str) {
        let resolver =
            VersionResolver::new(Arc::new(registry_with(&["v1.6.0", "v1.6.3", "v1.8.0"])));

        assert_eq!(resolver.resolve(&d3_bar(), specifier).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn resolve_ignores_non_release_tags() {
        let resolver = VersionResolver::new(Arc::new(registry_with(&[
            "nightly",
            "v2.0.0-rc.1",
            "v1.2.0",
            "latest",
        ])));

        assert_eq!(resolver.resolve(&d3_bar(), "master").await.unwrap(), "v1.2.0");
    }

    #[tokio::test]
    async fn resolve_canonicalizes_tags_without_prefix() {
        let resolver = VersionResolver::new(Arc::new(registry_with(&["1.0.0", "1.1.0"])));

        assert_eq!(resolver.resolve(&d3_bar(), "1.x").await.unwrap(), "v1.1.0");
    }

    #[rstest]
    #[case("9.9.9")]
    #[case("2.x")]
    #[case("1.7")]
    #[tokio::test]
    async fn resolve_returns_not_found_when_nothing_matches(#[case] specifier: &str) {
        let resolver =
            VersionResolver::new(Arc::new(registry_with(&["v1.6.0", "v1.6.3", "v1.8.0"])));

        assert!(matches!(
            resolver.resolve(&d3_bar(), specifier).await,
            Err(ResolveError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn resolve_default_branch_fails_without_releases() {
        let resolver = VersionResolver::new(Arc::new(registry_with(&["nightly"])));

        assert!(matches!(
            resolver.resolve(&d3_bar(), "master").await,
            Err(ResolveError::NotFound { .. })
        ));
    }

    #[rstest]
    #[case("")]
    #[case("x.1.0")]
    #[case("1.x.0")]
    #[case("main")]
    #[tokio::test]
    async fn resolve_rejects_malformed_specifier_without_fetching(#[case] specifier: &str) {
        let mut registry = MockTagRegistry::new();
        registry.expect_fetch_all_tags().times(0);
        let resolver = VersionResolver::new(Arc::new(registry));

        assert!(matches!(
            resolver.resolve(&d3_bar(), specifier).await,
            Err(ResolveError::InvalidSpecifier(_))
        ));
    }

    #[tokio::test]
    async fn resolve_maps_missing_repository_to_not_found() {
        let mut registry = MockTagRegistry::new();
        registry
            .expect_fetch_all_tags()
            .times(1)
            .returning(|repo| Err(RegistryError::NotFound(repo.full_name())));
        let resolver = VersionResolver::new(Arc::new(registry));

        let result = resolver.resolve(&d3_bar(), "1.x").await;

        assert!(matches!(
            result,
            Err(ResolveError::NotFound { repository, .. }) if repository == "tj/d3-bar"
        ));
    }

    #[tokio::test]
    async fn resolve_maps_registry_failure_to_transient() {
        let mut registry = MockTagRegistry::new();
        registry.expect_fetch_all_tags().times(1).returning(|_| {
            Err(RegistryError::InvalidResponse(
                "Unexpected status: 503 Service Unavailable".to_string(),
            ))
        });
        let resolver = VersionResolver::new(Arc::new(registry));

        let err = resolver.resolve(&d3_bar(), "1.x").await.unwrap_err();

        assert!(matches!(err, ResolveError::Transient(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn resolve_skips_fetch_for_empty_identity() {
        let mut registry = MockTagRegistry::new();
        registry.expect_fetch_all_tags().times(0);
        let resolver = VersionResolver::new(Arc::new(registry));

        assert!(matches!(
            resolver
                .resolve(&RepositoryIdentity::new("", "d3-bar"), "1.x")
                .await,
            Err(ResolveError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn resolve_uses_configured_default_branch() {
        let resolver = VersionResolver::with_default_branch(
            Arc::new(registry_with(&["v0.1.0", "v0.2.0"])),
            "main",
        );

        assert_eq!(resolver.default_branch(), "main");
        assert_eq!(resolver.resolve(&d3_bar(), "main").await.unwrap(), "v0.2.0");
        assert!(matches!(
            resolver.resolve(&d3_bar(), "master").await,
            Err(ResolveError::InvalidSpecifier(_))
        ));
    }

    #[tokio::test]
    async fn resolve_rejects_empty_specifier_with_empty_default_branch() {
        let mut registry = MockTagRegistry::new();
        registry.expect_fetch_all_tags().times(0);
        let resolver = VersionResolver::with_default_branch(Arc::new(registry), "");

        assert!(matches!(
            resolver.resolve(&d3_bar(), "").await,
            Err(ResolveError::InvalidSpecifier(_))
        ));
    }

    #[tokio::test]
    async fn resolve_is_idempotent() {
        let resolver = VersionResolver::new(Arc::new(registry_with(&[
            "v1.8.0", "v1.10.0", "v1.9.0",
        ])));

        let first = resolver.resolve(&d3_bar(), "1.x").await.unwrap();
        let second = resolver.resolve(&d3_bar(), "1.x").await.unwrap();

        assert_eq!(first, "v1.10.0");
        assert_eq!(first, second);
    }
}
