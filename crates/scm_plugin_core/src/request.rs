//! Generation requests and mode selection.

use crate::errors::{Error, GeneratorResult};

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

/// Input to [`crate::Generator::generate`].
///
/// Which fields are populated selects the generation mode; see
/// [`GenerationRequest::mode`]. Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Organizations to discover repositories in (standalone mode).
    pub orgs: Vec<String>,
    /// Clone URL of a repository supplied by an SCM provider (matrix mode).
    pub url: Option<String>,
    pub repository: Option<String>,
    pub organization: Option<String>,
    /// Directory path supplied by a git directory generator (path mode).
    pub path: Option<String>,
    /// Repository the path belongs to (path mode).
    pub repo_url: Option<String>,
    pub envs: Vec<String>,
    /// Repository-name regular expressions for standalone discovery.
    pub include_patterns: Vec<String>,
    pub branch: Option<String>,
}

/// A validated generation mode with its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationMode<'a> {
    Path {
        path: &'a str,
        repo_url: Option<&'a str>,
    },
    Matrix {
        url: &'a str,
        repository: &'a str,
        organization: &'a str,
    },
    Standalone {
        orgs: &'a [String],
    },
}

impl GenerationRequest {
    /// Selects the generation mode. Checked in order: `path`, then
    /// `url` + `repository` + `organization`, then `orgs`.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidRequest` - none of the field combinations is present
    pub fn mode(&self) -> GeneratorResult<GenerationMode<'_>> {
        if let Some(path) = non_empty(&self.path) {
            return Ok(GenerationMode::Path {
                path,
                repo_url: non_empty(&self.repo_url),
            });
        }

        if let (Some(url), Some(repository), Some(organization)) = (
            non_empty(&self.url),
            non_empty(&self.repository),
            non_empty(&self.organization),
        ) {
            return Ok(GenerationMode::Matrix {
                url,
                repository,
                organization,
            });
        }

        if !self.orgs.is_empty() {
            return Ok(GenerationMode::Standalone { orgs: &self.orgs });
        }

        Err(Error::InvalidRequest(
            "either 'orgs' (standalone mode) or 'url'+'repository'+'organization' (matrix mode) or 'path' (path mode) must be provided"
                .to_string(),
        ))
    }

    /// The requested branch, or `default` when none was given.
    pub fn branch_or<'a>(&'a self, default: &'a str) -> &'a str {
        non_empty(&self.branch).unwrap_or(default)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
