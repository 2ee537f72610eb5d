//! Parameter generation for the Argo CD ApplicationSet SCM plugin.
//!
//! This crate turns a repository description into ApplicationSet parameter
//! sets: one per `(environment, chart, cluster)` for business applications,
//! or one per directory for the Kubernetes manifest repositories.
//!
//! # Layouts
//!
//! Repositories are classified by name (see [`LayoutRegistry`]):
//!
//! | repository | strategy | path |
//! |------------|----------|------|
//! | `kubernetes-<env>-<cluster>` | split-by-env | `<type>/<namespace>/<chart>` |
//! | `kubernetes-manifests*` | monorepo | `<cluster>/<type>/<namespace>/<chart>` |
//! | anything else | business-app | driven by `project-info.yaml` |
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scm_plugin_core::{GenerationRequest, Generator, PluginConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PluginConfig::from_env()?;
//! let client = github_client::create_token_client(&config.github_token, None)?;
//! let source = Arc::new(github_client::GitHubClient::new(client));
//! let generator = Generator::new(config, source)?;
//!
//! let request = GenerationRequest {
//!     path: Some("cluster1/apps/team-a/web".to_string()),
//!     ..Default::default()
//! };
//! let parameters = generator.generate(&request).await?;
//! # Ok(())
//! # }
//! ```

pub mod argocd_config;
pub mod config;
pub mod errors;
pub mod generator;
pub mod layout;
pub mod layout_registry;
pub mod layout_resolver;
pub mod naming;
pub mod parameter;
pub mod project;
pub mod repo_url;
pub mod request;
pub mod value_files;

pub use argocd_config::ArgoCDConfig;
pub use config::PluginConfig;
pub use errors::{Error, GeneratorResult};
pub use generator::Generator;
pub use layout::{
    ClusterResolution, LayoutConfig, LayoutConventions, LayoutStrategy, PathStructure,
    ResolvedLayout,
};
pub use layout_registry::LayoutRegistry;
pub use layout_resolver::LayoutResolver;
pub use naming::{generate_application_name, MAX_APPLICATION_NAME_LENGTH};
pub use parameter::Parameter;
pub use project::{ClusterConfig, ProjectInfo};
pub use repo_url::{parse_repository_url, RepositoryIdentity};
pub use request::{GenerationMode, GenerationRequest};
pub use value_files::{build_value_files, ChartFileListing};
