//! Registry trait for listing the published tags of a repository

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::RepositoryIdentity;

/// Trait for fetching the tags a repository has published
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait TagRegistry: Send + Sync {
    /// Fetches every tag name of a repository
    ///
    /// # Arguments
    /// * `repository` - The repository to list (e.g., `tj/d3-bar`)
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Tag names in whatever order the remote reports them
    /// * `Err(RegistryError::NotFound)` - If the repository does not exist
    /// * `Err(RegistryError)` - If the fetch fails for any other reason
    async fn fetch_all_tags(
        &self,
        repository: &RepositoryIdentity,
    ) -> Result<Vec<String>, RegistryError>;
}
