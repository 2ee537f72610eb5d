//! Crate for reading repository content from the GitHub REST API.
//!
//! This crate provides a token-authenticated client and the
//! [`RepositoryContentSource`] trait, which is the only view of GitHub the
//! parameter generator depends on: file reads, directory listings, path
//! probes and organization repository listings.

use async_trait::async_trait;
use http::StatusCode;
use octocrab::{Octocrab, Result as OctocrabResult};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

pub mod errors;
pub use errors::Error;

pub mod contents;
pub use contents::{EntryType, TreeEntry};

use contents::FileContent;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Number of repositories requested per page when listing an organization.
const REPOSITORIES_PER_PAGE: usize = 100;

/// Read-only access to repository content.
///
/// `NotFound` is reported distinctly (either as `Ok(None)` / `Ok(false)` or
/// as [`Error::NotFound`]) so callers can treat missing content as absent
/// rather than as a failure.
#[async_trait]
pub trait RepositoryContentSource: Send + Sync {
    /// Get the text content of a file at `git_ref`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(String))` - File content if the file exists
    /// * `Ok(None)` - File does not exist
    /// * `Err(Error)` - Access denied, network error, or other failure
    async fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<String>, Error>;

    /// List the entries of a directory at `git_ref`.
    ///
    /// # Errors
    ///
    /// * `Error::NotFound` - the path does not exist
    /// * `Error::InvalidResponse` - the path is a file, not a directory
    async fn list_directory_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<Vec<TreeEntry>, Error>;

    /// Check whether a file or directory exists at `git_ref`.
    async fn path_exists(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<bool, Error>;

    /// List the names of every repository in an organization, following
    /// pagination until the last page.
    async fn list_organization_repositories(&self, org: &str) -> Result<Vec<String>, Error>;
}

/// A client for reading repository content, authenticated with a token.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` from an already configured `Octocrab`.
    ///
    /// Use [`create_token_client`] to build the `Octocrab` instance.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Issues a GET against the Contents API and returns the raw JSON body,
    /// which is an array for directories and an object for files.
    async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<serde_json::Value, Error> {
        let route = format!(
            "/repos/{}/{}/contents/{}",
            owner,
            repo,
            path.trim_matches('/')
        );
        let query = RefQuery { git_ref };

        debug!("Making API call to: {}", route);
        let response: OctocrabResult<serde_json::Value> =
            self.client.get(route, Some(&query)).await;

        response.map_err(|e| map_octocrab_error("Failed to get repository contents", e))
    }
}

#[async_trait]
impl RepositoryContentSource for GitHubClient {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo, path = %path))]
    async fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<String>, Error> {
        let body = match self.get_contents(owner, repo, path, git_ref).await {
            Ok(body) => body,
            Err(Error::NotFound) => {
                debug!("File does not exist");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if body.is_array() {
            warn!("Expected a file but the path is a directory");
            return Err(Error::InvalidResponse);
        }

        let file: FileContent = serde_json::from_value(body)?;
        file.decode().map(Some)
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, path = %path))]
    async fn list_directory_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<Vec<TreeEntry>, Error> {
        let body = self.get_contents(owner, repo, path, git_ref).await?;

        if !body.is_array() {
            warn!("Expected a directory but the path is a file");
            return Err(Error::InvalidResponse);
        }

        let entries: Vec<TreeEntry> = serde_json::from_value(body)?;
        debug!(entry_count = entries.len(), "Listed directory contents");
        Ok(entries)
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, path = %path))]
    async fn path_exists(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<bool, Error> {
        match self.get_contents(owner, repo, path, git_ref).await {
            Ok(_) => Ok(true),
            Err(Error::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self), fields(org = %org))]
    async fn list_organization_repositories(&self, org: &str) -> Result<Vec<String>, Error> {
        let route = format!("/orgs/{}/repos", org);
        let mut names = Vec::new();
        let mut page = 1u32;

        loop {
            let query = RepositoryListQuery {
                repository_type: "all",
                per_page: REPOSITORIES_PER_PAGE,
                page,
            };

            let response: OctocrabResult<Vec<RepositorySummary>> =
                self.client.get(&route, Some(&query)).await;
            let repositories = response.map_err(|e| {
                map_octocrab_error("Failed to list repositories for organization", e)
            })?;

            let count = repositories.len();
            debug!(page = page, count = count, "Received repository page");
            names.extend(repositories.into_iter().map(|r| r.name));

            if count < REPOSITORIES_PER_PAGE {
                break;
            }
            page += 1;
        }

        info!(
            org = org,
            repository_count = names.len(),
            "Listed organization repositories"
        );
        Ok(names)
    }
}

#[derive(Debug, Serialize)]
struct RefQuery<'a> {
    #[serde(rename = "ref")]
    git_ref: &'a str,
}

#[derive(Debug, Serialize)]
struct RepositoryListQuery {
    #[serde(rename = "type")]
    repository_type: &'static str,
    per_page: usize,
    page: u32,
}

#[derive(Debug, Deserialize)]
struct RepositorySummary {
    name: String,
}

/// Creates an `Octocrab` client authenticated with a personal or
/// installation access token.
///
/// `base_uri` overrides the API root, for GitHub Enterprise Server or a
/// local mock server.
///
/// # Errors
///
/// Returns `Error::ApiError` when the base URI is invalid or the client
/// cannot be built.
#[instrument(skip(token))]
pub fn create_token_client(token: &SecretString, base_uri: Option<&str>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder().personal_token(token.expose_secret().to_string());

    if let Some(uri) = base_uri {
        builder = builder.base_uri(uri).map_err(|e| {
            error!(base_uri = uri, error = %e, "Invalid GitHub API base URI");
            Error::ApiError()
        })?;
    }

    builder.build().map_err(|e| {
        error!(error = ?e, "Failed to build Octocrab client");
        Error::ApiError()
    })
}

/// Maps an octocrab failure onto the crate error, classifying by the HTTP
/// status GitHub returned.
fn map_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    if let octocrab::Error::GitHub { source, .. } = &e {
        let status = source.status_code;
        if status == StatusCode::NOT_FOUND {
            return Error::NotFound;
        }
        if status == StatusCode::UNAUTHORIZED {
            error!(error_message = %source.message, "{}. GitHub rejected the token", message);
            return Error::AuthError(source.message.clone());
        }
        if (status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS)
            && source.message.to_lowercase().contains("rate limit")
        {
            warn!(error_message = %source.message, "{}. Rate limit exceeded", message);
            return Error::RateLimitExceeded;
        }
    }

    log_octocrab_error(message, e);
    Error::InvalidResponse
}

fn log_octocrab_error(message: &str, e: octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, .. } => error!(
            error_message = source.message,
            status = %source.status_code,
            "{}. Received an error from GitHub",
            message
        ),
        octocrab::Error::Serde { source, .. } => error!(
            error_message = source.to_string(),
            "{}. The response body could not be parsed.",
            message
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}
