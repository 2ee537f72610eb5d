//! Path resolution for each layout strategy.
//!
//! [`LayoutResolver`] is a closed set: one variant per [`LayoutStrategy`].
//! The business-app variant exists only to reject path resolution, since
//! business applications are generated from `project-info.yaml`.

use regex::Regex;

use crate::errors::{Error, GeneratorResult};
use crate::layout::{
    ClusterResolution, LayoutConfig, LayoutStrategy, PathStructure, ResolvedLayout,
    DEFAULT_NAMESPACE,
};

#[cfg(test)]
#[path = "layout_resolver_tests.rs"]
mod tests;

/// A compiled, ready-to-use resolver for one layout.
#[derive(Debug, Clone)]
pub enum LayoutResolver {
    Monorepo(MonorepoResolver),
    SplitByEnv(SplitByEnvResolver),
    BusinessApp,
}

impl LayoutResolver {
    /// Builds the resolver for `config`, compiling any patterns it carries.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidLayoutPattern` - a pattern does not compile, or a
    ///   split-by-env layout has no environment pattern
    pub fn from_config(config: &LayoutConfig) -> GeneratorResult<Self> {
        match config.strategy {
            LayoutStrategy::Monorepo => Ok(LayoutResolver::Monorepo(MonorepoResolver::new(config)?)),
            LayoutStrategy::SplitByEnv => {
                Ok(LayoutResolver::SplitByEnv(SplitByEnvResolver::new(config)?))
            }
            LayoutStrategy::BusinessApp => Ok(LayoutResolver::BusinessApp),
        }
    }

    pub fn strategy(&self) -> LayoutStrategy {
        match self {
            LayoutResolver::Monorepo(_) => LayoutStrategy::Monorepo,
            LayoutResolver::SplitByEnv(_) => LayoutStrategy::SplitByEnv,
            LayoutResolver::BusinessApp => LayoutStrategy::BusinessApp,
        }
    }

    /// Parses `path` (and, for split repositories, `repository`) into its
    /// deployment components.
    ///
    /// # Errors
    ///
    /// * `Error::MalformedPath` - too few path segments
    /// * `Error::PatternMismatch` - the repository name does not match
    /// * `Error::UnsupportedOperation` - business-app layouts
    pub fn resolve(&self, repository: &str, path: &str) -> GeneratorResult<ResolvedLayout> {
        match self {
            LayoutResolver::Monorepo(resolver) => resolver.resolve(repository, path),
            LayoutResolver::SplitByEnv(resolver) => resolver.resolve(repository, path),
            LayoutResolver::BusinessApp => Err(Error::UnsupportedOperation(
                "business app resolver should not be used for path resolution - use project-info.yaml instead"
                    .to_string(),
            )),
        }
    }
}

/// Resolver for the manifests monorepo.
#[derive(Debug, Clone)]
pub struct MonorepoResolver {
    cluster: MonorepoCluster,
    structure: PathStructure,
}

#[derive(Debug, Clone)]
enum MonorepoCluster {
    Static(String),
    PathIndex(usize),
    RepoPattern(Regex),
    Unset,
}

impl MonorepoResolver {
    fn new(config: &LayoutConfig) -> GeneratorResult<Self> {
        let cluster = match &config.cluster {
            Some(ClusterResolution::Static(name)) => MonorepoCluster::Static(name.clone()),
            Some(ClusterResolution::FromPathIndex(index)) => MonorepoCluster::PathIndex(*index),
            Some(ClusterResolution::FromRepoPattern(pattern)) => {
                MonorepoCluster::RepoPattern(compile(pattern)?)
            }
            None => MonorepoCluster::Unset,
        };

        Ok(Self {
            cluster,
            structure: config.path_structure.unwrap_or(PathStructure {
                type_index: 1,
                namespace_index: 2,
                chart_index: 3,
            }),
        })
    }

    fn resolve(&self, repository: &str, path: &str) -> GeneratorResult<ResolvedLayout> {
        let segments = split_path(LayoutStrategy::Monorepo, path)?;

        let cluster = match &self.cluster {
            MonorepoCluster::Static(name) => name.clone(),
            MonorepoCluster::PathIndex(index) => segment(&segments, *index),
            MonorepoCluster::RepoPattern(pattern) => pattern
                .captures(repository)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
                .ok_or_else(|| Error::PatternMismatch {
                    repository: repository.to_string(),
                    pattern: pattern.as_str().to_string(),
                })?,
            MonorepoCluster::Unset => String::new(),
        };

        Ok(components(&segments, &self.structure, cluster, String::new()))
    }
}

/// Resolver for `<prefix>-<env>-<cluster>` repositories.
#[derive(Debug, Clone)]
pub struct SplitByEnvResolver {
    pattern: Regex,
    structure: PathStructure,
}

impl SplitByEnvResolver {
    fn new(config: &LayoutConfig) -> GeneratorResult<Self> {
        let pattern = config
            .env_pattern
            .as_deref()
            .or(match &config.cluster {
                Some(ClusterResolution::FromRepoPattern(pattern)) => Some(pattern.as_str()),
                _ => None,
            })
            .ok_or_else(|| Error::InvalidLayoutPattern {
                pattern: String::new(),
                reason: "split-by-env layout requires a repository name pattern".to_string(),
            })?;

        Ok(Self {
            pattern: compile(pattern)?,
            structure: config.path_structure.unwrap_or(PathStructure {
                type_index: 0,
                namespace_index: 1,
                chart_index: 2,
            }),
        })
    }

    fn resolve(&self, repository: &str, path: &str) -> GeneratorResult<ResolvedLayout> {
        let segments = split_path(LayoutStrategy::SplitByEnv, path)?;

        let (env, cluster) = self
            .pattern
            .captures(repository)
            .and_then(|caps| Some((caps.get(1)?, caps.get(2)?)))
            .map(|(env, cluster)| (env.as_str().to_string(), cluster.as_str().to_string()))
            .ok_or_else(|| Error::PatternMismatch {
                repository: repository.to_string(),
                pattern: self.pattern.as_str().to_string(),
            })?;

        Ok(components(&segments, &self.structure, cluster, env))
    }
}

fn compile(pattern: &str) -> GeneratorResult<Regex> {
    Regex::new(pattern).map_err(|e| Error::InvalidLayoutPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

fn split_path(strategy: LayoutStrategy, path: &str) -> GeneratorResult<Vec<&str>> {
    let segments: Vec<&str> = path.split('/').collect();
    let required = strategy.min_path_segments();
    if segments.len() < required {
        return Err(Error::MalformedPath {
            strategy,
            path: path.to_string(),
            required,
            actual: segments.len(),
        });
    }
    Ok(segments)
}

fn segment(segments: &[&str], index: usize) -> String {
    segments
        .get(index)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

fn components(
    segments: &[&str],
    structure: &PathStructure,
    cluster: String,
    env: String,
) -> ResolvedLayout {
    let namespace = segments
        .get(structure.namespace_index)
        .map(|s| s.to_string())
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

    ResolvedLayout {
        cluster,
        env,
        layout_type: segment(segments, structure.type_index),
        namespace,
        chart: segment(segments, structure.chart_index),
    }
}
