//! Process configuration for the generator.
//!
//! Built once at startup and handed to the generator and the content
//! source. Nothing reads the environment after construction.
//!
//! | variable | default |
//! |----------|---------|
//! | `GITHUB_TOKEN` | required |
//! | `GITHUB_API_URL` | GitHub.com |
//! | `DEFAULT_BRANCH` | `main` |
//! | `DEFAULT_CLUSTERS` | `in-cluster` |
//! | `SPLIT_REPO_PREFIX` | `kubernetes` |
//! | `MONOREPO_NAME` | `kubernetes-manifests` |
//! | `MONOREPO_CLUSTER` | `in-cluster` |
//! | `DEFAULT_ORGANIZATION` | `cheddarwhizzy` |

use secrecy::SecretString;
use std::fmt;

use crate::errors::{Error, GeneratorResult};
use crate::layout::LayoutConventions;
use crate::project::ClusterConfig;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_CLUSTER: &str = "in-cluster";

/// Configuration shared by every generation request.
pub struct PluginConfig {
    pub github_token: SecretString,

    /// Base URI of the GitHub API. `None` targets GitHub.com.
    pub github_api_url: Option<String>,

    /// Branch used when a request does not name one.
    pub default_branch: String,

    /// Clusters used when project metadata declares none for an environment.
    pub default_clusters: Vec<ClusterConfig>,

    pub layout: LayoutConventions,
}

impl fmt::Debug for PluginConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginConfig")
            .field("github_token", &"[REDACTED]")
            .field("github_api_url", &self.github_api_url)
            .field("default_branch", &self.default_branch)
            .field("default_clusters", &self.default_clusters)
            .field("layout", &self.layout)
            .finish()
    }
}

impl PluginConfig {
    /// Configuration with the given token and every other setting at its default.
    pub fn new(github_token: SecretString) -> Self {
        Self {
            github_token,
            github_api_url: None,
            default_branch: DEFAULT_BRANCH.to_string(),
            default_clusters: default_clusters(),
            layout: LayoutConventions::default(),
        }
    }

    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidConfiguration` - `GITHUB_TOKEN` is unset or empty, or
    ///   `DEFAULT_CLUSTERS` is malformed
    pub fn from_env() -> GeneratorResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> GeneratorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let token = get("GITHUB_TOKEN").ok_or_else(|| Error::InvalidConfiguration {
            field: "GITHUB_TOKEN".to_string(),
            reason: "environment variable is required".to_string(),
        })?;

        let mut config = Self::new(SecretString::from(token));
        config.github_api_url = get("GITHUB_API_URL");
        if let Some(branch) = get("DEFAULT_BRANCH") {
            config.default_branch = branch;
        }
        if let Some(clusters) = get("DEFAULT_CLUSTERS") {
            config.default_clusters = parse_cluster_list(&clusters)?;
        }

        let layout = &mut config.layout;
        if let Some(prefix) = get("SPLIT_REPO_PREFIX") {
            layout.split_prefix = prefix;
        }
        if let Some(name) = get("MONOREPO_NAME") {
            layout.monorepo_name = name;
        }
        if let Some(cluster) = get("MONOREPO_CLUSTER") {
            layout.monorepo_cluster = cluster;
        }
        if let Some(org) = get("DEFAULT_ORGANIZATION") {
            layout.default_organization = org;
        }

        Ok(config)
    }
}

fn default_clusters() -> Vec<ClusterConfig> {
    vec![ClusterConfig::new(DEFAULT_CLUSTER, DEFAULT_CLUSTER)]
}

/// Parses `name[=destination],...`. A missing destination defaults to the
/// cluster name.
pub fn parse_cluster_list(value: &str) -> GeneratorResult<Vec<ClusterConfig>> {
    let mut clusters = Vec::new();

    for entry in value.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, destination) = match entry.split_once('=') {
            Some((name, destination)) => (name.trim(), destination.trim()),
            None => (entry, entry),
        };
        if name.is_empty() || destination.is_empty() {
            return Err(Error::InvalidConfiguration {
                field: "DEFAULT_CLUSTERS".to_string(),
                reason: format!("invalid cluster entry '{entry}'"),
            });
        }
        clusters.push(ClusterConfig::new(name, destination));
    }

    if clusters.is_empty() {
        return Err(Error::InvalidConfiguration {
            field: "DEFAULT_CLUSTERS".to_string(),
            reason: "at least one cluster is required".to_string(),
        });
    }

    Ok(clusters)
}
