//! GitHub tags API registry implementation

use crate::version::error::RegistryError;
use crate::version::registry::TagRegistry;
use crate::version::types::RepositoryIdentity;
use serde::Deserialize;
use tracing::{debug, warn};

/// Default base URL for GitHub API
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Tags requested per page (GitHub's maximum)
const PER_PAGE: u32 = 100;

/// Upper bound on followed pages, so a misbehaving `Link` header cannot loop forever
const MAX_PAGES: usize = 100;

/// Entry of the GitHub tags API response
#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

/// Registry implementation for the GitHub tags API
pub struct GitHubRegistry {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubRegistry {
    /// Creates a new GitHubRegistry with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("tag-resolver")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Authenticates every request with the given bearer token
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    async fn fetch_page(
        &self,
        url: &str,
        repository: &RepositoryIdentity,
    ) -> Result<(Vec<String>, Option<String>), RegistryError> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(repository.full_name()));
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let next = response
            .headers()
            .get("link")
            .and_then(|v| v.to_str().ok())
            .and_then(next_page_url);

        let tags: Vec<Tag> = response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub tags response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        Ok((tags.into_iter().map(|t| t.name).collect(), next))
    }
}

impl Default for GitHubRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl TagRegistry for GitHubRegistry {
    async fn fetch_all_tags(
        &self,
        repository: &RepositoryIdentity,
    ) -> Result<Vec<String>, RegistryError> {
        let mut url = Some(format!(
            "{}/repos/{}/{}/tags?per_page={}",
            self.base_url, repository.owner, repository.project, PER_PAGE
        ));
        let mut tags = Vec::new();

        for page in 1..=MAX_PAGES {
            let Some(current) = url.take() else {
                return Ok(tags);
            };

            let (batch, next) = self.fetch_page(&current, repository).await?;
            debug!(
                "Fetched {} tags for {} (page {})",
                batch.len(),
                repository,
                page
            );
            tags.extend(batch);
            url = next;
        }

        if url.is_some() {
            warn!("Tag listing for {} exceeds {} pages", repository, MAX_PAGES);
            return Err(RegistryError::InvalidResponse(format!(
                "More than {} pages of tags",
                MAX_PAGES
            )));
        }

        Ok(tags)
    }
}

/// Extract the `rel="next"` target from a `Link` response header
fn next_page_url(link: &str) -> Option<String> {
    link.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| param.trim() == r#"rel="next""#);
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
