//! Application name generation.
//!
//! Names follow the Helm release name rules: at most 53 characters,
//! lowercase, hyphen separated. Short names are `repository-chart-cluster`
//! verbatim; long ones are truncated and suffixed with a digest of the full
//! triple so that distinct triples keep distinct names.
//!
//! A truncated component never ends in a separator, so truncation does not
//! produce `--` or a hyphen before the digest. Lowercasing is per character
//! and leaves characters without a single-character lowercase form as they
//! are, which keeps the length bound exact.

use sha2::{Digest, Sha256};

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;

/// Maximum length of a generated application name.
pub const MAX_APPLICATION_NAME_LENGTH: usize = 53;

const HASH_SUFFIX_LENGTH: usize = 8;

/// Room left for the readable part once `-<hash>` is appended.
const MAX_TRUNCATED_LENGTH: usize = MAX_APPLICATION_NAME_LENGTH - HASH_SUFFIX_LENGTH - 1;

/// Smallest budget given to repository and chart together.
const MIN_REPO_CHART_BUDGET: usize = 10;

/// Builds the application name for a `(repository, chart, cluster)` triple.
///
/// The result is deterministic and never longer than
/// [`MAX_APPLICATION_NAME_LENGTH`] characters.
///
/// # Examples
///
/// ```rust
/// use scm_plugin_core::generate_application_name;
///
/// assert_eq!(generate_application_name("a", "b", "c"), "a-b-c");
/// assert_eq!(generate_application_name("My_Svc", "web", "east"), "my-svc-web-east");
/// ```
pub fn generate_application_name(repository: &str, chart_name: &str, cluster: &str) -> String {
    let full = format!("{repository}-{chart_name}-{cluster}");
    if full.chars().count() <= MAX_APPLICATION_NAME_LENGTH {
        return normalize(&full);
    }

    let cluster_len = cluster.chars().count();
    let repo_chart_budget = MAX_TRUNCATED_LENGTH
        .saturating_sub(cluster_len + 2)
        .max(MIN_REPO_CHART_BUDGET);
    let repo_budget = repo_chart_budget / 2;
    let chart_budget = repo_chart_budget - repo_budget;

    let repository = truncate_component(repository, repo_budget);
    let chart_name = truncate_component(chart_name, chart_budget);

    let mut truncated = format!("{repository}-{chart_name}-{cluster}");
    let truncated_len = truncated.chars().count();
    if truncated_len > MAX_TRUNCATED_LENGTH {
        let without_cluster = truncated_len - cluster_len;
        if let Some(cluster_budget) = MAX_TRUNCATED_LENGTH
            .checked_sub(without_cluster + 1)
            .filter(|budget| *budget > 0)
        {
            truncated = format!(
                "{repository}-{chart_name}-{}",
                truncate_component(cluster, cluster_budget)
            );
        }
    }

    let suffix = hash_suffix(&full);
    let mut name = format!("{truncated}-{suffix}");
    if name.chars().count() > MAX_APPLICATION_NAME_LENGTH {
        name = format!(
            "{}-{suffix}",
            truncate_component(&truncated, MAX_TRUNCATED_LENGTH)
        );
    }

    normalize(&name)
}

/// First eight hex digits of the SHA-256 digest of `value`.
fn hash_suffix(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    let mut hex = hex::encode(digest);
    hex.truncate(HASH_SUFFIX_LENGTH);
    hex
}

/// Keeps the leading `max_chars` characters of `value`.
fn truncate(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

/// Truncates `value` and drops any separators left at the cut.
fn truncate_component(value: &str, max_chars: usize) -> &str {
    truncate(value, max_chars).trim_end_matches(['-', '_'])
}

fn normalize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c == '_' {
                return '-';
            }
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => l,
                _ => c,
            }
        })
        .collect()
}
