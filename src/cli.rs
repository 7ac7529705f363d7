//! Command-line orchestration around the resolver
//!
//! Applies the caller-side policy the resolver leaves out: a timeout per
//! resolution and concurrent resolution of several targets.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use thiserror::Error;
use tracing::warn;

use crate::config::ResolverConfig;
use crate::version::error::ResolveError;
use crate::version::registries::GitHubRegistry;
use crate::version::resolver::VersionResolver;
use crate::version::types::ResolveRequest;

#[derive(Debug, Error)]
pub enum TargetError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Timed out after {0:?}")]
    TimedOut(Duration),
}

/// Result of resolving one command-line target
#[derive(Debug)]
pub struct TargetOutcome {
    pub request: ResolveRequest,
    /// Specifier actually resolved (the default branch when none was given)
    pub specifier: String,
    pub result: Result<String, TargetError>,
}

impl TargetOutcome {
    /// `owner/project@specifier`
    pub fn label(&self) -> String {
        format!("{}@{}", self.request.identity, self.specifier)
    }
}

/// Build a resolver backed by the GitHub API as configured
pub fn build_resolver(config: &ResolverConfig) -> VersionResolver {
    let registry = GitHubRegistry::new(&config.github.base_url).with_token(config.github.token());
    VersionResolver::with_default_branch(Arc::new(registry), config.default_branch.clone())
}

/// Resolve every request concurrently, each bounded by `timeout`.
///
/// Outcomes are returned in request order.
pub async fn resolve_all(
    resolver: &VersionResolver,
    requests: Vec<ResolveRequest>,
    timeout: Duration,
) -> Vec<TargetOutcome> {
    let futures = requests.into_iter().map(|request| async move {
        let specifier = request
            .specifier
            .clone()
            .unwrap_or_else(|| resolver.default_branch().to_string());

        let result =
            match tokio::time::timeout(timeout, resolver.resolve(&request.identity, &specifier))
                .await
            {
                Ok(result) => result.map_err(TargetError::from),
                Err(_) => {
                    warn!("Resolving {}@{} timed out", request.identity, specifier);
                    Err(TargetError::TimedOut(timeout))
                }
            };

        TargetOutcome {
            request,
            specifier,
            result,
        }
    });

    join_all(futures).await
}
