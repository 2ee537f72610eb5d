//! Helm value-file override chains.

use github_client::TreeEntry;
use std::collections::HashSet;

#[cfg(test)]
#[path = "value_files_tests.rs"]
mod tests;

/// Snapshot of the file names present in one chart directory.
///
/// Taken once per `(env, chart)` and shared by every cluster of that chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartFileListing {
    files: HashSet<String>,
}

impl ChartFileListing {
    /// Builds a listing from directory entries, keeping only regular files.
    pub fn from_entries(entries: &[TreeEntry]) -> Self {
        Self {
            files: entries
                .iter()
                .filter(|entry| entry.is_file())
                .map(|entry| entry.name.clone())
                .collect(),
        }
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.files.contains(file_name)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ChartFileListing {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Builds the ordered value-file chain for one `(env, chart, cluster)`.
///
/// Paths are relative to the base chart at `deployment/k8s/base/<chart>`.
/// Later entries override earlier ones:
///
/// 1. `values.yaml`
/// 2. `../../<env>/<chart>/values.yaml`
/// 3. `../../<env>/<chart>/image.yaml` if present
/// 4. `../../<env>/<chart>/values-<cluster>.yaml` if present
/// 5. `../../<env>/<chart>/image-<cluster>.yaml` if present
pub fn build_value_files(
    env: &str,
    chart: &str,
    cluster: &str,
    listing: &ChartFileListing,
) -> Vec<String> {
    let env_dir = format!("../../{env}/{chart}");

    let mut files = vec!["values.yaml".to_string(), format!("{env_dir}/values.yaml")];

    let optional = [
        "image.yaml".to_string(),
        format!("values-{cluster}.yaml"),
        format!("image-{cluster}.yaml"),
    ];
    files.extend(
        optional
            .into_iter()
            .filter(|name| listing.contains(name))
            .map(|name| format!("{env_dir}/{name}")),
    );

    files
}
