//! Shared fixtures for router and handler tests.

use async_trait::async_trait;
use github_client::{EntryType, RepositoryContentSource, TreeEntry};
use secrecy::SecretString;
use std::collections::BTreeMap;
use std::sync::Arc;

use scm_plugin_core::{Generator, PluginConfig};

use crate::AppState;

/// Files keyed by `(repository, path)`, for any owner. Directories are
/// implied by the paths.
#[derive(Default)]
pub struct FixtureSource {
    pub files: BTreeMap<(String, String), String>,
}

impl FixtureSource {
    pub fn with_file(mut self, repo: &str, path: &str, content: &str) -> Self {
        self.files
            .insert((repo.to_string(), path.to_string()), content.to_string());
        self
    }
}

#[async_trait]
impl RepositoryContentSource for FixtureSource {
    async fn get_file_content(
        &self,
        _owner: &str,
        repo: &str,
        path: &str,
        _git_ref: &str,
    ) -> Result<Option<String>, github_client::Error> {
        Ok(self.files.get(&(repo.to_string(), path.to_string())).cloned())
    }

    async fn list_directory_contents(
        &self,
        _owner: &str,
        repo: &str,
        path: &str,
        _git_ref: &str,
    ) -> Result<Vec<TreeEntry>, github_client::Error> {
        let prefix = format!("{path}/");
        let mut children = BTreeMap::new();
        for (file_repo, file) in self.files.keys() {
            if file_repo != repo {
                continue;
            }
            if let Some(rest) = file.strip_prefix(&prefix) {
                match rest.split_once('/') {
                    Some((dir, _)) => children.insert(dir.to_string(), EntryType::Dir),
                    None => children.insert(rest.to_string(), EntryType::File),
                };
            }
        }

        if children.is_empty() {
            return Err(github_client::Error::NotFound);
        }

        Ok(children
            .into_iter()
            .map(|(name, entry_type)| TreeEntry {
                path: format!("{prefix}{name}"),
                name,
                entry_type,
                sha: String::new(),
                size: 0,
                download_url: None,
            })
            .collect())
    }

    async fn path_exists(
        &self,
        _owner: &str,
        repo: &str,
        path: &str,
        _git_ref: &str,
    ) -> Result<bool, github_client::Error> {
        let prefix = format!("{path}/");
        Ok(self
            .files
            .keys()
            .any(|(r, f)| r == repo && (f == path || f.starts_with(&prefix))))
    }

    async fn list_organization_repositories(
        &self,
        _org: &str,
    ) -> Result<Vec<String>, github_client::Error> {
        let mut repos: Vec<String> = self.files.keys().map(|(r, _)| r.clone()).collect();
        repos.dedup();
        Ok(repos)
    }
}

pub fn app_state(source: FixtureSource) -> AppState {
    let config = PluginConfig::new(SecretString::from("ghp_test".to_string()));
    let generator = Generator::new(config, Arc::new(source)).unwrap();
    AppState::new(Arc::new(generator))
}

/// A business app `svc1` with a `web` chart in `staging`.
pub fn business_app_source() -> FixtureSource {
    FixtureSource::default().with_file("svc1", "deployment/k8s/staging/web/values.yaml", "")
}
