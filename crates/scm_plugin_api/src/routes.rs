//! HTTP routing configuration
//!
//! # Route Structure
//!
//! ```text
//! - POST   /api/v1/getparams.execute - Plugin generator endpoint
//! - POST   /v1/generator.getParams - Alternate plugin path
//! - POST   /generate - Direct testing endpoint
//! - *      /healthz - Liveness check (any method)
//! - *      anything else - Plugin request if POST, otherwise 405
//! ```

use axum::{
    middleware,
    routing::{any, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};

use crate::{handlers, middleware as api_middleware, AppState};

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

/// Create the complete API router with all routes configured.
///
/// This function sets up:
/// - The plugin endpoints and the catch-all fallback
/// - The plugin token check (plugin endpoints only)
/// - Request tracing
pub fn create_router(state: AppState) -> Router {
    // Headers are not recorded; the Authorization header carries the plugin token.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new())
        .on_response(DefaultOnResponse::new());

    let plugin_routes = Router::new()
        .route("/api/v1/getparams.execute", post(handlers::generate_parameters))
        .route("/v1/generator.getParams", post(handlers::generate_parameters))
        .route("/generate", post(handlers::generate_parameters))
        .fallback(handlers::fallback)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api_middleware::plugin_auth_middleware,
        ));

    Router::new()
        .merge(plugin_routes)
        // Health check (no token required)
        .route("/healthz", any(handlers::healthz))
        .layer(middleware::from_fn(api_middleware::tracing_middleware))
        .layer(trace_layer)
        .with_state(state)
}
