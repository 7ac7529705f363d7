//! Request types shared by the resolver, registries and the CLI

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::version::error::RequestError;

/// GitHub owner names: alphanumerics and hyphens, no leading hyphen
static OWNER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*$").expect("valid owner regex"));

/// GitHub repository names: alphanumerics, `.`, `_` and `-`
static PROJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid project regex"));

/// Identifies a hosted source repository (e.g. `tj/d3-bar`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryIdentity {
    pub owner: String,
    pub project: String,
}

impl RepositoryIdentity {
    pub fn new(owner: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            project: project.into(),
        }
    }

    /// Returns `owner/project`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.project)
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.project)
    }
}

impl FromStr for RepositoryIdentity {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((owner, project)) = s.split_once('/') else {
            return Err(RequestError::InvalidRepository(s.to_string()));
        };

        let dot_only = project == "." || project == "..";
        if !OWNER_RE.is_match(owner) || !PROJECT_RE.is_match(project) || dot_only {
            return Err(RequestError::InvalidRepository(s.to_string()));
        }

        Ok(Self::new(owner, project))
    }
}

/// A repository plus the version the caller asked for, as written on the
/// command line: `owner/project@specifier`.
///
/// `specifier` is `None` when no `@` part was given, which callers treat as
/// the default branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    pub identity: RepositoryIdentity,
    pub specifier: Option<String>,
}

impl FromStr for ResolveRequest {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (repo, specifier) = match s.split_once('@') {
            Some((repo, specifier)) => (repo, Some(specifier.to_string())),
            None => (s, None),
        };

        Ok(Self {
            identity: repo.parse()?,
            specifier,
        })
    }
}
