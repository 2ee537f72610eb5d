//! HTTP surface of the ApplicationSet SCM plugin.
//!
//! Argo CD's plugin generator POSTs a JSON envelope to the plugin and
//! expects the generated parameters back:
//!
//! ```text
//! POST /api/v1/getparams.execute
//! { "input": { "parameters": { "repository": "svc1", "organization": "acme", ... } } }
//!
//! 200 OK
//! { "output": { "parameters": [ { "chartName": "web", "cluster": "in-cluster", ... } ] } }
//! ```
//!
//! # Architecture
//!
//! This crate handles:
//! - HTTP request/response translation
//! - The optional plugin bearer token check
//! - Error mapping from domain to HTTP
//! - Routing and server configuration
//!
//! Parameter generation itself lives in `scm_plugin_core`; the dependency
//! only flows from here into the core.

use secrecy::SecretString;
use std::sync::Arc;

use scm_plugin_core::Generator;

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod translation;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export key types for convenience
pub use errors::ApiError;
pub use models::{request, response};
pub use server::{ApiConfig, ApiServer};

/// Default API port
pub const DEFAULT_PORT: u16 = 8080;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<Generator>,

    /// Token Argo CD must present as `Authorization: Bearer <token>`.
    /// `None` disables the check.
    pub plugin_token: Option<Arc<SecretString>>,
}

impl AppState {
    pub fn new(generator: Arc<Generator>) -> Self {
        Self {
            generator,
            plugin_token: None,
        }
    }

    /// Require `token` on every plugin request.
    pub fn with_plugin_token(mut self, token: SecretString) -> Self {
        self.plugin_token = Some(Arc::new(token));
        self
    }
}
