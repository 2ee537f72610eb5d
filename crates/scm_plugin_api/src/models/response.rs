//! HTTP response type definitions

use serde::{Deserialize, Serialize};

use scm_plugin_core::Parameter;

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;

/// Plugin generator response. Argo CD requires the parameter list to be
/// wrapped in an `output` object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginResponse {
    pub output: PluginOutput,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginOutput {
    pub parameters: Vec<Parameter>,
}

impl PluginResponse {
    pub fn new(parameters: Vec<Parameter>) -> Self {
        Self {
            output: PluginOutput { parameters },
        }
    }
}
