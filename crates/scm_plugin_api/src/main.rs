//! ArgoCD ApplicationSet SCM plugin server
//!
//! # Environment Variables
//!
//! - `GITHUB_TOKEN`: GitHub token used to read repositories (required)
//! - `GITHUB_API_URL`: GitHub API base URI (default: GitHub.com)
//! - `PORT`: Port to listen on (default: 8080)
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `PLUGIN_TOKEN`: Bearer token Argo CD must present (default: no check)
//! - `RUST_LOG`: Log level (default: info)
//!
//! Generation settings (`DEFAULT_BRANCH`, `DEFAULT_CLUSTERS` and the layout
//! conventions) are read by `PluginConfig::from_env`.

use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::sync::Arc;

use github_client::{create_token_client, GitHubClient};
use scm_plugin_api::{ApiConfig, ApiServer, AppState};
use scm_plugin_core::{Generator, PluginConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = PluginConfig::from_env().context("Failed to load plugin configuration")?;
    tracing::info!(
        token_length = config.github_token.expose_secret().len(),
        api_url = config.github_api_url.as_deref().unwrap_or("https://api.github.com"),
        default_branch = %config.default_branch,
        "Loaded GitHub configuration"
    );

    let api_config = ApiConfig::from_env()?;

    let octocrab = create_token_client(&config.github_token, config.github_api_url.as_deref())
        .context("Failed to create GitHub client")?;
    let source = Arc::new(GitHubClient::new(octocrab));
    let generator = Generator::new(config, source).context("Failed to create generator")?;

    let mut state = AppState::new(Arc::new(generator));
    match env::var("PLUGIN_TOKEN") {
        Ok(token) if !token.trim().is_empty() => {
            state = state.with_plugin_token(SecretString::from(token));
            tracing::info!("Plugin token check enabled");
        }
        _ => tracing::warn!("PLUGIN_TOKEN not set, plugin requests are not authenticated"),
    }

    let server = ApiServer::new(api_config, state);
    server.serve().await
}
