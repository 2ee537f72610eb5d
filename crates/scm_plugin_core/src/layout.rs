//! Layout configuration types.
//!
//! A layout describes how a repository's directory paths (and, for
//! split repositories, its name) map onto deployment coordinates. Three
//! conventions are supported:
//!
//! ```text
//! kubernetes-manifests/<cluster>/infra|apps/<namespace>/<chart>   monorepo
//! kubernetes-<env>-<cluster>/infra|apps/<namespace>/<chart>       split-by-env
//! <service>/deployment/k8s/base|<env>/<chart>                     business-app
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;

/// Namespace used when the configured namespace segment is out of range.
pub const DEFAULT_NAMESPACE: &str = "default";

/// How paths in a repository are decomposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStrategy {
    /// `kubernetes-manifests/<cluster>/infra|apps/<namespace>/<chart>`
    Monorepo,
    /// `kubernetes-<env>-<cluster>/infra|apps/<namespace>/<chart>`
    SplitByEnv,
    /// `deployment/k8s/...` driven by `project-info.yaml`, never by paths.
    BusinessApp,
}

impl LayoutStrategy {
    /// Minimum number of path segments the strategy needs to resolve a path.
    pub fn min_path_segments(self) -> usize {
        match self {
            LayoutStrategy::Monorepo => 4,
            LayoutStrategy::SplitByEnv => 3,
            LayoutStrategy::BusinessApp => 0,
        }
    }
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutStrategy::Monorepo => "monorepo",
            LayoutStrategy::SplitByEnv => "split-by-env",
            LayoutStrategy::BusinessApp => "business-app",
        };
        f.write_str(name)
    }
}

/// Where the cluster name of a resolved layout comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClusterResolution {
    /// A fixed cluster name, independent of the path.
    Static(String),
    /// The path segment at the given zero-based index.
    FromPathIndex(usize),
    /// A regular expression applied to the repository name. For split
    /// repositories the second capture group is the cluster; otherwise the
    /// first group is used.
    FromRepoPattern(String),
}

/// Zero-based segment indices for the type, namespace and chart components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStructure {
    pub type_index: usize,
    pub namespace_index: usize,
    pub chart_index: usize,
}

/// Resolution rules for one layout strategy.
///
/// Instances are immutable once built and are cached per repository name by
/// [`crate::LayoutRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub strategy: LayoutStrategy,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<ClusterResolution>,

    /// Pattern applied to the repository name whose first two capture
    /// groups are (environment, cluster).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_structure: Option<PathStructure>,
}

impl LayoutConfig {
    /// Monorepo layout: the cluster is `static_cluster`, and
    /// type/namespace/chart sit at path segments 1/2/3.
    ///
    /// Segment 0 holds the cluster directory, but it is not read; every
    /// monorepo application deploys to `static_cluster`. Use
    /// [`ClusterResolution::FromPathIndex`] to read it instead.
    pub fn monorepo(static_cluster: impl Into<String>) -> Self {
        Self {
            strategy: LayoutStrategy::Monorepo,
            cluster: Some(ClusterResolution::Static(static_cluster.into())),
            env_pattern: None,
            path_structure: Some(PathStructure {
                type_index: 1,
                namespace_index: 2,
                chart_index: 3,
            }),
        }
    }

    /// Split-by-environment layout for repositories named
    /// `<prefix>-<env>-<cluster>`; type/namespace/chart sit at 0/1/2.
    pub fn split_by_env(prefix: &str) -> Self {
        let pattern = format!("{}-(.+)-(.+)", regex::escape(prefix));
        Self {
            strategy: LayoutStrategy::SplitByEnv,
            cluster: Some(ClusterResolution::FromRepoPattern(pattern.clone())),
            env_pattern: Some(pattern),
            path_structure: Some(PathStructure {
                type_index: 0,
                namespace_index: 1,
                chart_index: 2,
            }),
        }
    }

    /// Business-app layout. It carries no path rules.
    pub fn business_app() -> Self {
        Self {
            strategy: LayoutStrategy::BusinessApp,
            cluster: None,
            env_pattern: None,
            path_structure: None,
        }
    }
}

/// Components parsed out of a repository path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLayout {
    pub cluster: String,
    /// Empty for layouts that do not encode an environment.
    pub env: String,
    /// `infra` or `apps`
    pub layout_type: String,
    pub namespace: String,
    pub chart: String,
}

/// Naming conventions used to classify repositories and to fill in
/// path-mode defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConventions {
    /// Prefix of split-by-environment repositories (`<prefix>-<env>-<cluster>`).
    pub split_prefix: String,
    /// Name (or name prefix) of the manifests monorepo.
    pub monorepo_name: String,
    /// Cluster every monorepo path resolves to.
    pub monorepo_cluster: String,
    /// Organization assumed by path mode when no repository URL is given.
    pub default_organization: String,
}

impl Default for LayoutConventions {
    fn default() -> Self {
        Self {
            split_prefix: "kubernetes".to_string(),
            monorepo_name: "kubernetes-manifests".to_string(),
            monorepo_cluster: "in-cluster".to_string(),
            default_organization: "cheddarwhizzy".to_string(),
        }
    }
}
