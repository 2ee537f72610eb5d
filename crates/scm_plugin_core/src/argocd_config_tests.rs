use super::*;
use serde_json::json;

const FULL_CONFIG: &str = r#"
syncPolicy:
  automated:
    prune: true
    selfHeal: false
  retry:
    limit: 5
    backoff:
      duration: 5s
      factor: 2
      maxDuration: 3m
  managedNamespaceMetadata:
    labels:
      team: payments
    annotations:
      owner: platform
syncOptions:
  - CreateNamespace=true
  - ServerSideApply=true
ignoreDifferences:
  - group: apps
    kind: Deployment
    jsonPointers:
      - /spec/replicas
revisionHistoryLimit: 3
"#;

#[test]
fn test_parse_full_config() {
    let config = ArgoCDConfig::from_yaml(FULL_CONFIG).unwrap();

    let policy = config.sync_policy.as_ref().unwrap();
    let automated = policy.automated.as_ref().unwrap();
    assert_eq!(automated.prune, Some(true));
    assert_eq!(automated.self_heal, Some(false));
    assert_eq!(automated.allow_empty, None);

    let retry = policy.retry.as_ref().unwrap();
    assert_eq!(retry.limit, 5);
    assert_eq!(retry.backoff.duration, "5s");
    assert_eq!(retry.backoff.factor, 2);
    assert_eq!(retry.backoff.max_duration, "3m");

    let metadata = policy.managed_namespace_metadata.as_ref().unwrap();
    assert_eq!(metadata.labels.get("team").map(String::as_str), Some("payments"));

    assert_eq!(
        config.sync_options,
        vec!["CreateNamespace=true", "ServerSideApply=true"]
    );
    assert_eq!(config.ignore_differences[0].kind, "Deployment");
    assert_eq!(config.ignore_differences[0].json_pointers, vec!["/spec/replicas"]);
    assert_eq!(config.revision_history_limit, Some(3));
}

#[test]
fn test_empty_document_is_default() {
    assert_eq!(ArgoCDConfig::from_yaml("").unwrap(), ArgoCDConfig::default());
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = ArgoCDConfig::from_yaml("project: default\nsyncOptions: [Validate=false]\n").unwrap();

    assert_eq!(config.sync_options, vec!["Validate=false"]);
}

#[test]
fn test_serializes_only_present_fields() {
    let config = ArgoCDConfig {
        sync_policy: Some(SyncPolicyConfig {
            automated: Some(AutomatedConfig {
                prune: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    };

    assert_eq!(
        serde_json::to_value(&config).unwrap(),
        json!({ "syncPolicy": { "automated": { "prune": true } } })
    );
    assert_eq!(
        serde_json::to_value(ArgoCDConfig::default()).unwrap(),
        json!({})
    );
}
