//! The parameter record emitted for each generated application.

use serde::{Deserialize, Serialize};

use crate::argocd_config::{ArgoCDConfig, IgnoreDifferenceConfig, SyncPolicyConfig};

#[cfg(test)]
#[path = "parameter_tests.rs"]
mod tests;

/// One ApplicationSet parameter set.
///
/// Serialized with the camelCase keys ApplicationSet templates reference,
/// e.g. `{{ .chartName }}` or `{{ .valueFiles }}`. Sync settings are only
/// present when a chart carries an `argocd-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub organization: String,
    pub repository: String,
    pub url: String,
    pub branch: String,
    pub env: String,
    pub chart_name: String,
    pub chart_path: String,
    pub cluster: String,
    pub destination_name: String,
    pub namespace: String,
    pub value_files: Vec<String>,
    pub application_name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sync_options: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_policy: Option<SyncPolicyConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_differences: Vec<IgnoreDifferenceConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<i64>,
}

impl Parameter {
    /// Copies the sync settings of `config` into this parameter.
    pub fn with_sync_config(mut self, config: ArgoCDConfig) -> Self {
        self.sync_options = config.sync_options;
        self.sync_policy = config.sync_policy;
        self.ignore_differences = config.ignore_differences;
        self.revision_history_limit = config.revision_history_limit;
        self
    }
}
