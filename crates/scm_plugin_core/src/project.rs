//! `project-info.yaml` metadata for business-app repositories.
//!
//! ```yaml
//! name: payments
//! deployment:
//!   namespace: payments
//!   environments:
//!     prod:
//!       clusters:
//!         - name: prod-east
//!           destinationName: prod-east
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;

/// File read from the repository root in matrix and standalone modes.
pub const PROJECT_INFO_FILE: &str = "project-info.yaml";

/// Project metadata. Every field is optional; a missing file is treated the
/// same as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub deployment: ProjectDeployment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDeployment {
    #[serde(default)]
    pub namespace: String,

    /// Environment name to its target clusters. `None` when the key is absent.
    #[serde(default)]
    pub environments: Option<HashMap<String, EnvironmentConfig>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub clusters: Vec<ClusterConfig>,
}

/// A deployment target: the cluster identifier used in names and value
/// files, and the Argo CD destination it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConfig {
    pub name: String,

    #[serde(default)]
    pub destination_name: String,
}

impl ClusterConfig {
    pub fn new(name: impl Into<String>, destination_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            destination_name: destination_name.into(),
        }
    }
}

impl ProjectInfo {
    /// Parses `project-info.yaml` content. Empty documents yield the default.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Declared namespace, or `repository` with any `.git` suffix removed.
    pub fn namespace_or(&self, repository: &str) -> String {
        if self.deployment.namespace.is_empty() {
            repository
                .strip_suffix(".git")
                .unwrap_or(repository)
                .to_string()
        } else {
            self.deployment.namespace.clone()
        }
    }

    /// Clusters declared for `env`, or `defaults` when the project declares
    /// no environments, omits `env`, or lists no clusters for it.
    pub fn clusters_for_env<'a>(
        &'a self,
        env: &str,
        defaults: &'a [ClusterConfig],
    ) -> &'a [ClusterConfig] {
        match self
            .deployment
            .environments
            .as_ref()
            .and_then(|environments| environments.get(env))
        {
            Some(config) if !config.clusters.is_empty() => &config.clusters,
            _ => defaults,
        }
    }
}
