//! Error handling and HTTP error conversion
//!
//! Domain errors from `scm_plugin_core` are converted to HTTP responses at
//! this boundary. Argo CD only surfaces the body of a failed plugin call in
//! the ApplicationSet status, so bodies are plain text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors returned by the plugin endpoints.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(State(state): State<AppState>) -> Result<Json<PluginResponse>, ApiError> {
///     let parameters = state.generator.generate(&request).await?; // Converts domain error
///     Ok(Json(domain_parameters_to_http(parameters)))
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body is not a valid plugin request.
    #[error("Invalid request: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Parameter generation failed.
    #[error("Failed to generate parameters: {0}")]
    Generation(#[from] scm_plugin_core::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Generation(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidBody(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        // Log error server-side
        log_error(&message, status);

        (status, message).into_response()
    }
}

fn log_error(message: &str, status: StatusCode) {
    match status {
        StatusCode::INTERNAL_SERVER_ERROR => {
            tracing::error!("API error: {} - {}", status, message);
        }
        StatusCode::BAD_REQUEST => {
            tracing::warn!("API error: {} - {}", status, message);
        }
        _ => {
            tracing::info!("API error: {} - {}", status, message);
        }
    }
}
