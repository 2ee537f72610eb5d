//! HTTP request type definitions
//!
//! Every field is optional at this layer. Which fields are present decides
//! the generation mode, and that check happens in the core once the
//! request is translated.

use serde::{Deserialize, Deserializer, Serialize};

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

/// Body of a plugin generator request.
///
/// Argo CD also sends `applicationSetName`; it is accepted and ignored.
///
/// # Example
///
/// ```json
/// {
///   "applicationSetName": "business-apps",
///   "input": {
///     "parameters": {
///       "url": "git@github.com:acme/svc1.git",
///       "repository": "svc1",
///       "organization": "acme",
///       "envs": ["staging", "prod"]
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginInput {
    #[serde(default)]
    pub input: PluginInputBody,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginInputBody {
    #[serde(default)]
    pub parameters: PluginParameters,
}

/// Parameters configured on the ApplicationSet's plugin generator, plus
/// whatever an enclosing matrix generator merged in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginParameters {
    /// Standalone mode: organizations to discover repositories in
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub orgs: Vec<String>,

    /// Matrix mode: clone URL from the SCM provider generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Matrix mode: repository name from the SCM provider generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    /// Matrix mode: organization from the SCM provider generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// Path mode: directory from the git directory generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Path mode: repository the directory belongs to
    #[serde(default, rename = "repoURL", skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub envs: Vec<String>,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub include_patterns: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

/// Reads a list that Argo CD may send as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
