//! HTTP request handlers
//!
//! Each plugin handler:
//! 1. Parses the body as a plugin request (400 on failure)
//! 2. Translates it to a domain `GenerationRequest`
//! 3. Runs the generator
//! 4. Wraps the parameters in the plugin response envelope

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, Uri},
    Json,
};

use crate::{
    errors::ApiError,
    models::{request::PluginInput, response::PluginResponse},
    translation::{domain_parameters_to_http, http_plugin_input_to_domain},
    AppState,
};

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

/// /healthz, any method
pub async fn healthz() -> &'static str {
    "OK"
}

/// POST /api/v1/getparams.execute, /v1/generator.getParams and /generate
///
/// The body is read as raw bytes so that malformed JSON is reported as a
/// plain-text 400 instead of axum's JSON rejection.
pub async fn generate_parameters(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PluginResponse>, ApiError> {
    tracing::debug!(body = %String::from_utf8_lossy(&body), "Received plugin request");

    let input: PluginInput = serde_json::from_slice(&body)?;
    let request = http_plugin_input_to_domain(input);

    let parameters = state.generator.generate(&request).await?;
    tracing::info!(count = parameters.len(), "Returning parameters");

    Ok(Json(domain_parameters_to_http(parameters)))
}

/// Any other path.
///
/// Argo CD versions differ in the path they call, so an unknown path is
/// served as a plugin request when it is a POST.
pub async fn fallback(
    state: State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Json<PluginResponse>, ApiError> {
    tracing::info!(method = %method, path = %uri.path(), "Request on unregistered path");

    if method != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    generate_parameters(state, body).await
}
