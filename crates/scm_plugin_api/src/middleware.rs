//! Request tracing and plugin token middleware

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use secrecy::ExposeSecret;

use crate::AppState;

#[cfg(test)]
#[path = "middleware_tests.rs"]
mod tests;

/// Header carrying the generated request id on every response.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Plugin token middleware.
///
/// Argo CD sends the token configured in the plugin's ConfigMap as
/// `Authorization: Bearer <token>`. When the state carries no token every
/// request is let through.
///
/// Returns 401 if:
/// - Authorization header is missing
/// - Authorization header is not `Bearer <token>`
/// - The token does not match
pub async fn plugin_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(expected) = state.plugin_token.as_ref() else {
        return Ok(next.run(request).await);
    };

    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = extract_bearer_token(auth_header)?;
    if token != expected.expose_secret() {
        tracing::warn!("Rejected plugin request with an invalid token");
        return Err(AuthError::InvalidToken);
    }

    Ok(next.run(request).await)
}

/// Extract Bearer token from Authorization header.
///
/// Expected format: "Bearer <token>"
fn extract_bearer_token(auth_header: &str) -> Result<&str, AuthError> {
    let parts: Vec<&str> = auth_header.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(AuthError::InvalidFormat);
    }

    if !parts[0].eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidScheme);
    }

    Ok(parts[1])
}

/// Request tracing middleware.
///
/// Adds a request id to the logs and to the `x-request-id` response header.
pub async fn tracing_middleware(request: Request, next: Next) -> Response {
    // Generate request ID
    let request_id = uuid::Uuid::new_v4().to_string();

    tracing::info!(
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
        "Request started"
    );

    let mut response = next.run(request).await;

    tracing::info!(
        request_id = %request_id,
        status = %response.status(),
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Authentication errors
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Authorization header is missing
    MissingToken,

    /// Authorization header format is invalid
    InvalidFormat,

    /// Authorization scheme is not "Bearer"
    InvalidScheme,

    /// Token does not match the configured plugin token
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => {
                "Authentication required. Provide the plugin token in the Authorization header."
            }
            AuthError::InvalidFormat => {
                "Invalid Authorization header format. Expected: 'Bearer <token>'"
            }
            AuthError::InvalidScheme => {
                "Invalid authorization scheme. Only 'Bearer' tokens are supported."
            }
            AuthError::InvalidToken => "Invalid plugin token.",
        };

        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Bearer")],
            message,
        )
            .into_response()
    }
}
