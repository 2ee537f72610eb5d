//! Error types for parameter generation.
//!
//! The variants split into two groups. Request-level failures
//! (`MalformedPath`, `PatternMismatch`, `UnsupportedOperation`,
//! `InvalidRequest`, `InvalidRepositoryUrl`) abort the request and are
//! reported to the caller. `UpstreamUnavailable` is normally absorbed by the
//! generator, which skips the affected unit and logs a warning.

use thiserror::Error;

use crate::layout::LayoutStrategy;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised while resolving layouts and generating parameters.
#[derive(Error, Debug)]
pub enum Error {
    /// The path has fewer `/`-separated segments than the layout requires.
    #[error("{strategy} path must have at least {required} segments, got {actual}: {path}")]
    MalformedPath {
        strategy: LayoutStrategy,
        path: String,
        required: usize,
        actual: usize,
    },

    /// The repository-name pattern did not yield both environment and cluster.
    #[error("failed to extract env/cluster from repository name '{repository}' using pattern '{pattern}'")]
    PatternMismatch { repository: String, pattern: String },

    /// The business-app layout was asked to resolve a path.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The request does not select any generation mode, or carries invalid input.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A repository URL is neither an SSH nor an HTTPS GitHub URL.
    #[error("unsupported repository URL format: {0}")]
    InvalidRepositoryUrl(String),

    /// A layout pattern failed to compile.
    #[error("invalid layout pattern '{pattern}': {reason}")]
    InvalidLayoutPattern { pattern: String, reason: String },

    /// A process configuration value is missing or malformed.
    #[error("invalid configuration: {field} - {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// A call to the repository content source failed.
    #[error("content source unavailable during {operation}: {source}")]
    UpstreamUnavailable {
        operation: String,
        #[source]
        source: github_client::Error,
    },
}

impl Error {
    pub(crate) fn upstream(operation: impl Into<String>, source: github_client::Error) -> Self {
        Error::UpstreamUnavailable {
            operation: operation.into(),
            source,
        }
    }

    /// Returns `true` for errors caused by the caller's input rather than by
    /// layout resolution or the content source.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidRequest(_) | Error::InvalidRepositoryUrl(_)
        )
    }
}

/// Result type alias for generation operations.
pub type GeneratorResult<T> = Result<T, Error>;
