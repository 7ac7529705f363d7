use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid version specifier: {0:?}")]
    InvalidSpecifier(String),

    #[error("No tag of {repository} matches {specifier:?}")]
    NotFound {
        repository: String,
        specifier: String,
    },

    #[error("Failed to list tags: {0}")]
    Transient(#[source] RegistryError),
}

impl ResolveError {
    /// Whether the caller may retry the same resolution later
    pub fn is_retryable(&self) -> bool {
        matches!(self, ResolveError::Transient(_))
    }
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid repository {0:?}: expected owner/project")]
    InvalidRepository(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("defaultBranch must not be empty")]
    EmptyDefaultBranch,
}
