use super::*;

fn registry() -> LayoutRegistry {
    LayoutRegistry::new(LayoutConventions::default()).unwrap()
}

#[test]
fn test_classify_split_repository() {
    let config = registry().classify("kubernetes-prod-west");

    assert_eq!(config.strategy, LayoutStrategy::SplitByEnv);
    assert_eq!(config.env_pattern.as_deref(), Some("kubernetes-(.+)-(.+)"));
}

#[test]
fn test_classify_monorepo() {
    let registry = registry();

    assert_eq!(
        registry.strategy_for("kubernetes-manifests"),
        LayoutStrategy::Monorepo
    );
    assert_eq!(
        registry.classify("kubernetes-manifests").cluster,
        Some(crate::layout::ClusterResolution::Static("in-cluster".to_string()))
    );
}

#[test]
fn test_split_rule_takes_precedence_over_monorepo_prefix() {
    // Has the monorepo prefix but also matches <prefix>-<a>-<b>.
    assert_eq!(
        registry().strategy_for("kubernetes-manifests-legacy"),
        LayoutStrategy::SplitByEnv
    );
}

#[test]
fn test_classify_business_app() {
    let registry = registry();

    for name in ["svc1", "kubernetes-prod", "my-kubernetes-prod-west", ""] {
        assert_eq!(
            registry.strategy_for(name),
            LayoutStrategy::BusinessApp,
            "repository: {name:?}"
        );
    }
}

#[test]
fn test_custom_conventions() {
    let registry = LayoutRegistry::new(LayoutConventions {
        split_prefix: "k8s".to_string(),
        monorepo_name: "platform-manifests".to_string(),
        monorepo_cluster: "hub".to_string(),
        default_organization: "acme".to_string(),
    })
    .unwrap();

    assert_eq!(registry.strategy_for("k8s-dev-east"), LayoutStrategy::SplitByEnv);
    assert_eq!(
        registry.strategy_for("kubernetes-dev-east"),
        LayoutStrategy::BusinessApp
    );

    let resolved = registry
        .resolver_for("platform-manifests")
        .unwrap()
        .resolve("platform-manifests", "c/apps/ns/chart")
        .unwrap();
    assert_eq!(resolved.cluster, "hub");
}

#[test]
fn test_resolver_is_cached_per_repository() {
    let registry = registry();

    let first = registry.resolver_for("kubernetes-manifests").unwrap();
    let second = registry.resolver_for("kubernetes-manifests").unwrap();
    registry.resolver_for("kubernetes-prod-west").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.cached_count(), 2);
}

#[test]
fn test_business_app_resolver_rejects_paths() {
    let resolver = registry().resolver_for("svc1").unwrap();

    assert!(matches!(
        resolver.resolve("svc1", "a/b/c/d"),
        Err(Error::UnsupportedOperation(_))
    ));
}

#[test]
fn test_registry_is_shareable_across_threads() {
    let registry = Arc::new(registry());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                let name = format!("kubernetes-env{i}-east");
                registry.resolver_for(&name).map(|r| r.strategy())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), LayoutStrategy::SplitByEnv);
    }
    assert_eq!(registry.cached_count(), 4);
}
