//! Translation between HTTP types and domain types
//!
//! Conversions happen at the API boundary. No validation is done here: the
//! core decides whether the fields select a generation mode.

use scm_plugin_core::{GenerationRequest, Parameter};

use crate::models::{request::PluginInput, response::PluginResponse};

#[cfg(test)]
#[path = "translation_tests.rs"]
mod tests;

/// Convert an HTTP plugin request into a domain `GenerationRequest`.
pub fn http_plugin_input_to_domain(input: PluginInput) -> GenerationRequest {
    let params = input.input.parameters;
    GenerationRequest {
        orgs: params.orgs,
        url: params.url,
        repository: params.repository,
        organization: params.organization,
        path: params.path,
        repo_url: params.repo_url,
        envs: params.envs,
        include_patterns: params.include_patterns,
        branch: params.branch,
    }
}

/// Wrap generated parameters in the plugin response envelope.
pub fn domain_parameters_to_http(parameters: Vec<Parameter>) -> PluginResponse {
    PluginResponse::new(parameters)
}
