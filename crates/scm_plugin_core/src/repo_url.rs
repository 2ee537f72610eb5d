//! Repository URL parsing.

use url::Url;

use crate::errors::{Error, GeneratorResult};

#[cfg(test)]
#[path = "repo_url_tests.rs"]
mod tests;

const SSH_PREFIX: &str = "git@github.com:";
const GITHUB_HOST: &str = "github.com";

/// Owner and name of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentity {
    pub owner: String,
    pub name: String,
}

impl RepositoryIdentity {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// SSH clone URL, `git@github.com:<owner>/<name>.git`.
    pub fn ssh_url(&self) -> String {
        format!("{SSH_PREFIX}{}/{}.git", self.owner, self.name)
    }
}

/// Extracts owner and repository name from a GitHub clone URL.
///
/// Accepted forms, each with an optional `.git` suffix:
///
/// * `git@github.com:<owner>/<repo>`
/// * `https://github.com/<owner>/<repo>`
///
/// # Errors
///
/// * `Error::InvalidRepositoryUrl` - any other shape
pub fn parse_repository_url(repo_url: &str) -> GeneratorResult<RepositoryIdentity> {
    let invalid = || Error::InvalidRepositoryUrl(repo_url.to_string());

    let full_path = if let Some(rest) = repo_url.strip_prefix(SSH_PREFIX) {
        rest.to_string()
    } else {
        let url = Url::parse(repo_url).map_err(|_| invalid())?;
        if url.scheme() != "https" || url.host_str() != Some(GITHUB_HOST) {
            return Err(invalid());
        }
        url.path().trim_start_matches('/').to_string()
    };

    let path = full_path.strip_suffix(".git").unwrap_or(full_path.as_str());
    match path.split('/').collect::<Vec<_>>().as_slice() {
        [owner, name] if !owner.is_empty() && !name.is_empty() => {
            Ok(RepositoryIdentity::new(*owner, *name))
        }
        _ => Err(invalid()),
    }
}
