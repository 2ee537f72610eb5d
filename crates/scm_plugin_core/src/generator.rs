//! Parameter generation.
//!
//! [`Generator`] runs one of three modes per request:
//!
//! * **path** - a single directory from a git directory generator, resolved
//!   through the repository's layout into exactly one parameter
//! * **matrix** - a single repository from an SCM provider generator,
//!   expanded over its environments, charts and clusters
//! * **standalone** - every repository of the requested organizations that
//!   has at least one requested environment, expanded as in matrix mode
//!
//! Matrix and standalone runs isolate failures: an environment, repository
//! or organization that cannot be read is logged and skipped.

use github_client::RepositoryContentSource;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::argocd_config::{ArgoCDConfig, ARGOCD_CONFIG_FILE};
use crate::config::{PluginConfig, DEFAULT_CLUSTER};
use crate::errors::{Error, GeneratorResult};
use crate::layout_registry::LayoutRegistry;
use crate::naming::generate_application_name;
use crate::parameter::Parameter;
use crate::project::{ProjectInfo, PROJECT_INFO_FILE};
use crate::repo_url::{parse_repository_url, RepositoryIdentity};
use crate::request::{GenerationMode, GenerationRequest};
use crate::value_files::{build_value_files, ChartFileListing};

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;

/// Directory holding per-environment chart overrides, `deployment/k8s/<env>`.
const DEPLOYMENT_ROOT: &str = "deployment/k8s";

/// A repository being expanded in matrix or standalone mode.
struct RepositoryTarget<'a> {
    organization: &'a str,
    repository: &'a str,
    url: &'a str,
    branch: &'a str,
}

/// Turns generation requests into ApplicationSet parameters.
pub struct Generator {
    config: PluginConfig,
    source: Arc<dyn RepositoryContentSource>,
    layouts: LayoutRegistry,
}

impl Generator {
    /// # Errors
    ///
    /// * `Error::InvalidLayoutPattern` - the configured layout conventions
    ///   produce an invalid classification pattern
    pub fn new(
        config: PluginConfig,
        source: Arc<dyn RepositoryContentSource>,
    ) -> GeneratorResult<Self> {
        let layouts = LayoutRegistry::new(config.layout.clone())?;
        Ok(Self {
            config,
            source,
            layouts,
        })
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn layouts(&self) -> &LayoutRegistry {
        &self.layouts
    }

    /// Generates the parameters for `request`.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidRequest` - no mode selected, or an include pattern is
    ///   not a valid regular expression
    /// * `Error::InvalidRepositoryUrl` - path mode with an unsupported `repoURL`
    /// * `Error::MalformedPath`, `Error::PatternMismatch`,
    ///   `Error::UnsupportedOperation` - path mode layout resolution failed
    #[instrument(skip(self, request))]
    pub async fn generate(&self, request: &GenerationRequest) -> GeneratorResult<Vec<Parameter>> {
        let branch = request.branch_or(&self.config.default_branch);

        let parameters = match request.mode()? {
            GenerationMode::Path { path, repo_url } => {
                vec![self.generate_path_mode(path, repo_url, branch).await?]
            }
            GenerationMode::Matrix {
                url,
                repository,
                organization,
            } => {
                info!(
                    organization = organization,
                    repository = repository,
                    "Matrix mode: processing repository from SCM provider"
                );
                let target = RepositoryTarget {
                    organization,
                    repository,
                    url,
                    branch,
                };
                self.generate_for_repository(&target, &request.envs).await
            }
            GenerationMode::Standalone { orgs } => {
                self.generate_standalone_mode(orgs, &request.envs, &request.include_patterns, branch)
                    .await?
            }
        };

        info!(count = parameters.len(), "Generated parameters");
        Ok(parameters)
    }

    async fn generate_path_mode(
        &self,
        path: &str,
        repo_url: Option<&str>,
        branch: &str,
    ) -> GeneratorResult<Parameter> {
        info!(path = path, "Path mode: processing path");

        let (identity, url) = match repo_url {
            Some(repo_url) => (parse_repository_url(repo_url)?, repo_url.to_string()),
            None => {
                let identity = RepositoryIdentity::new(
                    self.config.layout.default_organization.clone(),
                    self.config.layout.monorepo_name.clone(),
                );
                let url = identity.ssh_url();
                (identity, url)
            }
        };

        let resolver = self.layouts.resolver_for(&identity.name)?;
        let resolved = resolver.resolve(&identity.name, path)?;
        debug!(
            repository = %identity.name,
            strategy = %resolver.strategy(),
            cluster = %resolved.cluster,
            env = %resolved.env,
            namespace = %resolved.namespace,
            chart = %resolved.chart,
            "Resolved layout"
        );

        let sync_config = self
            .read_argocd_config(&identity.owner, &identity.name, path, branch)
            .await;

        let destination_name = if resolved.cluster.is_empty() {
            DEFAULT_CLUSTER.to_string()
        } else {
            resolved.cluster.clone()
        };

        let parameter = Parameter {
            application_name: generate_application_name(
                &identity.name,
                &resolved.chart,
                &resolved.cluster,
            ),
            organization: identity.owner,
            repository: identity.name,
            url,
            branch: branch.to_string(),
            env: resolved.env,
            chart_name: resolved.chart,
            chart_path: path.to_string(),
            cluster: resolved.cluster,
            destination_name,
            namespace: resolved.namespace,
            value_files: Vec::new(),
            ..Default::default()
        };

        Ok(parameter.with_sync_config(sync_config))
    }

    async fn generate_standalone_mode(
        &self,
        orgs: &[String],
        envs: &[String],
        include_patterns: &[String],
        branch: &str,
    ) -> GeneratorResult<Vec<Parameter>> {
        info!(orgs = ?orgs, "Standalone mode: discovering repositories");

        let include = compile_include_patterns(include_patterns)?;
        let mut parameters = Vec::new();

        for org in orgs {
            let repositories = match self.discover_repositories(org, envs, &include).await {
                Ok(repositories) => repositories,
                Err(e) => {
                    warn!(organization = %org, error = %e, "Skipping organization: repository discovery failed");
                    continue;
                }
            };

            for repository in &repositories {
                let url = RepositoryIdentity::new(org.as_str(), repository.as_str()).ssh_url();
                let target = RepositoryTarget {
                    organization: org,
                    repository,
                    url: &url,
                    branch,
                };
                parameters.extend(self.generate_for_repository(&target, envs).await);
            }
        }

        Ok(parameters)
    }

    /// Expands one repository over `envs`, its charts and their clusters.
    async fn generate_for_repository(
        &self,
        target: &RepositoryTarget<'_>,
        envs: &[String],
    ) -> Vec<Parameter> {
        let project = self
            .read_project_info(target.organization, target.repository, target.branch)
            .await;
        let namespace = project.namespace_or(target.repository);

        let mut parameters = Vec::new();
        for env in envs {
            let env_path = format!("{DEPLOYMENT_ROOT}/{env}");

            let charts = match self.discover_charts(target, &env_path).await {
                Ok(charts) => charts,
                Err(e) => {
                    warn!(
                        organization = %target.organization,
                        repository = %target.repository,
                        env = %env,
                        error = %e,
                        "Skipping environment: chart discovery failed"
                    );
                    continue;
                }
            };

            let clusters = project.clusters_for_env(env, &self.config.default_clusters);

            for (chart, listing) in &charts {
                let chart_path = format!("{DEPLOYMENT_ROOT}/base/{chart}");

                for cluster in clusters {
                    parameters.push(Parameter {
                        organization: target.organization.to_string(),
                        repository: target.repository.to_string(),
                        url: target.url.to_string(),
                        branch: target.branch.to_string(),
                        env: env.clone(),
                        chart_name: chart.clone(),
                        chart_path: chart_path.clone(),
                        cluster: cluster.name.clone(),
                        destination_name: cluster.destination_name.clone(),
                        namespace: namespace.clone(),
                        value_files: build_value_files(env, chart, &cluster.name, listing),
                        application_name: generate_application_name(
                            target.repository,
                            chart,
                            &cluster.name,
                        ),
                        ..Default::default()
                    });
                }
            }
        }

        parameters
    }

    /// Finds the charts of one environment together with their file listings.
    ///
    /// A chart is a non-hidden directory under `env_path` holding a
    /// `values.yaml`. Each chart directory is listed exactly once. When that
    /// listing fails the chart is still emitted with an empty listing, as
    /// long as its `values.yaml` can be confirmed directly.
    async fn discover_charts(
        &self,
        target: &RepositoryTarget<'_>,
        env_path: &str,
    ) -> GeneratorResult<Vec<(String, ChartFileListing)>> {
        let entries = match self
            .source
            .list_directory_contents(target.organization, target.repository, env_path, target.branch)
            .await
        {
            Ok(entries) => entries,
            Err(github_client::Error::NotFound) => {
                debug!(
                    repository = %target.repository,
                    path = %env_path,
                    "Environment directory does not exist"
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(Error::upstream("chart discovery", e)),
        };

        let mut charts = Vec::new();
        for entry in entries.iter().filter(|e| e.is_dir() && !e.name.starts_with('.')) {
            let chart_dir = format!("{env_path}/{}", entry.name);
            let listing = match self
                .source
                .list_directory_contents(target.organization, target.repository, &chart_dir, target.branch)
                .await
            {
                Ok(files) => ChartFileListing::from_entries(&files),
                Err(e) => {
                    warn!(
                        repository = %target.repository,
                        path = %chart_dir,
                        error = %e,
                        "Failed to list chart directory, using base value files"
                    );
                    if self.has_values_file(target, &chart_dir).await {
                        charts.push((entry.name.clone(), ChartFileListing::default()));
                    }
                    continue;
                }
            };

            if listing.contains("values.yaml") {
                charts.push((entry.name.clone(), listing));
            } else {
                debug!(path = %chart_dir, "Directory has no values.yaml, not a chart");
            }
        }

        Ok(charts)
    }

    /// Checks `<chart_dir>/values.yaml` directly. Used when the chart
    /// directory could not be listed; a failed check counts as absent.
    async fn has_values_file(&self, target: &RepositoryTarget<'_>, chart_dir: &str) -> bool {
        let values_path = format!("{chart_dir}/values.yaml");
        match self
            .source
            .path_exists(target.organization, target.repository, &values_path, target.branch)
            .await
        {
            Ok(exists) => exists,
            Err(e) => {
                warn!(
                    repository = %target.repository,
                    path = %values_path,
                    error = %e,
                    "Skipping chart: values.yaml check failed"
                );
                false
            }
        }
    }

    /// Lists an organization's repositories that contain at least one of
    /// `envs`, probing on the default branch.
    async fn discover_repositories(
        &self,
        org: &str,
        envs: &[String],
        include: &[Regex],
    ) -> GeneratorResult<Vec<String>> {
        let names = self
            .source
            .list_organization_repositories(org)
            .await
            .map_err(|e| Error::upstream("repository discovery", e))?;
        debug!(organization = %org, count = names.len(), "Listed organization repositories");

        let default_branch = &self.config.default_branch;
        let mut repositories = Vec::new();
        for name in names {
            if !include.is_empty() && !include.iter().any(|pattern| pattern.is_match(&name)) {
                continue;
            }

            for env in envs {
                let env_path = format!("{DEPLOYMENT_ROOT}/{env}");
                match self.source.path_exists(org, &name, &env_path, default_branch).await {
                    Ok(true) => {
                        repositories.push(name);
                        break;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        debug!(
                            organization = %org,
                            repository = %name,
                            path = %env_path,
                            error = %e,
                            "Path check failed"
                        );
                    }
                }
            }
        }

        info!(organization = %org, count = repositories.len(), "Discovered repositories");
        Ok(repositories)
    }

    async fn read_project_info(&self, owner: &str, repo: &str, branch: &str) -> ProjectInfo {
        match self
            .source
            .get_file_content(owner, repo, PROJECT_INFO_FILE, branch)
            .await
        {
            Ok(Some(content)) => ProjectInfo::from_yaml(&content).unwrap_or_else(|e| {
                warn!(repository = %repo, error = %e, "Failed to parse project-info.yaml, using defaults");
                ProjectInfo::default()
            }),
            Ok(None) => {
                debug!(repository = %repo, "No project-info.yaml, using defaults");
                ProjectInfo::default()
            }
            Err(e) => {
                warn!(repository = %repo, error = %e, "Failed to read project-info.yaml, using defaults");
                ProjectInfo::default()
            }
        }
    }

    async fn read_argocd_config(
        &self,
        owner: &str,
        repo: &str,
        chart_dir: &str,
        branch: &str,
    ) -> ArgoCDConfig {
        let config_path = format!("{chart_dir}/{ARGOCD_CONFIG_FILE}");
        match self
            .source
            .get_file_content(owner, repo, &config_path, branch)
            .await
        {
            Ok(Some(content)) => ArgoCDConfig::from_yaml(&content).unwrap_or_else(|e| {
                warn!(path = %config_path, error = %e, "Failed to parse argocd-config.yaml, ignoring");
                ArgoCDConfig::default()
            }),
            Ok(None) => ArgoCDConfig::default(),
            Err(e) => {
                warn!(path = %config_path, error = %e, "Failed to read argocd-config.yaml, ignoring");
                ArgoCDConfig::default()
            }
        }
    }
}

fn compile_include_patterns(patterns: &[String]) -> GeneratorResult<Vec<Regex>> {
    patterns
        .iter()
        .filter(|p| !p.is_empty())
        .map(|pattern| {
            Regex::new(pattern).map_err(|e| {
                Error::InvalidRequest(format!("invalid include pattern '{pattern}': {e}"))
            })
        })
        .collect()
}
