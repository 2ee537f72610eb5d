//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when reading repository
//! contents and organization listings through the github_client crate.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// Callers that treat missing content as "absent" should match on
/// [`Error::NotFound`] and only propagate the remaining variants.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.list_directory_contents("org", "repo", "deployment/k8s/prod", "main").await {
///     Ok(entries) => println!("{} entries", entries.len()),
///     Err(Error::NotFound) => println!("directory does not exist"),
///     Err(err) => eprintln!("GitHub unavailable: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A generic API request failure, e.g. the client could not be built.
    #[error("API request failed")]
    ApiError(),

    /// The token was rejected by GitHub (HTTP 401).
    ///
    /// The contained string is the message returned by GitHub.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// Error deserializing the response from GitHub.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The GitHub API returned a response in an unexpected format.
    ///
    /// Also used when a path expected to be a directory turns out to be a
    /// file (or the reverse), and for unexpected HTTP failures.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested resource was not found (HTTP 404).
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
