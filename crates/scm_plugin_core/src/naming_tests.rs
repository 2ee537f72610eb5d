use super::*;

fn assert_hash_suffixed(name: &str) {
    let (_, suffix) = name
        .rsplit_once('-')
        .unwrap_or_else(|| panic!("no hyphen in {name}"));
    assert_eq!(suffix.len(), HASH_SUFFIX_LENGTH, "name: {name}");
    assert!(
        suffix.chars().all(|c| c.is_ascii_hexdigit()),
        "suffix is not hex: {name}"
    );
}

#[test]
fn test_short_name_is_joined_verbatim() {
    assert_eq!(generate_application_name("a", "b", "c"), "a-b-c");
}

#[test]
fn test_short_name_is_lowercased_and_underscores_replaced() {
    assert_eq!(
        generate_application_name("Payment_Service", "API", "prod_east"),
        "payment-service-api-prod-east"
    );
}

#[test]
fn test_name_of_exactly_max_length_is_not_hashed() {
    let repository = "r".repeat(42);
    let name = generate_application_name(&repository, "chart", "east");

    assert_eq!(name.len(), MAX_APPLICATION_NAME_LENGTH);
    assert_eq!(name, format!("{repository}-chart-east"));
}

#[test]
fn test_long_repository_is_truncated_with_hash() {
    let repository = "r".repeat(60);
    let chart = "c".repeat(20);

    let name = generate_application_name(&repository, &chart, "east1");

    assert!(name.len() <= MAX_APPLICATION_NAME_LENGTH, "name: {name}");
    assert_hash_suffixed(&name);
    // 44 - (5 + 2) = 37, split 18/19 between repository and chart.
    assert!(name.starts_with(&format!("{}-{}-east1-", "r".repeat(18), "c".repeat(19))));
}

#[test]
fn test_generation_is_deterministic() {
    let repository = "a-very-long-repository-name-that-goes-on-and-on";
    let first = generate_application_name(repository, "frontend-chart", "production-east");
    let second = generate_application_name(repository, "frontend-chart", "production-east");

    assert_eq!(first, second);
}

#[test]
fn test_distinct_triples_with_same_prefix_get_distinct_names() {
    let shared = "shared-prefix-".repeat(4);
    let first = generate_application_name(&format!("{shared}one"), "chart", "east");
    let second = generate_application_name(&format!("{shared}two"), "chart", "east");

    assert_ne!(first, second);
    assert_eq!(
        first.rsplit_once('-').map(|(head, _)| head),
        second.rsplit_once('-').map(|(head, _)| head)
    );
}

#[test]
fn test_long_cluster_is_shrunk_to_fit() {
    let cluster = "c".repeat(70);

    let name = generate_application_name("repo", "chart", &cluster);

    assert!(name.len() <= MAX_APPLICATION_NAME_LENGTH, "name: {name}");
    assert!(name.starts_with("repo-chart-ccc"));
    assert_hash_suffixed(&name);
}

#[test]
fn test_length_bound_holds_across_shapes() {
    let lengths = [0, 1, 10, 30, 44, 53, 54, 80, 200];

    for &repo_len in &lengths {
        for &chart_len in &lengths {
            for &cluster_len in &lengths {
                let name = generate_application_name(
                    &"r".repeat(repo_len),
                    &"c".repeat(chart_len),
                    &"k".repeat(cluster_len),
                );
                assert!(
                    name.chars().count() <= MAX_APPLICATION_NAME_LENGTH,
                    "({repo_len}, {chart_len}, {cluster_len}) -> {name}"
                );
            }
        }
    }
}

#[test]
fn test_truncate_respects_char_boundaries() {
    assert_eq!(truncate("héllo", 2), "hé");
    assert_eq!(truncate("abc", 10), "abc");
    assert_eq!(truncate("abc", 0), "");
}

#[test]
fn test_truncation_does_not_leave_separator_at_cut() {
    // The repository budget is 19 characters; the 19th is a hyphen.
    let repository = format!("{}-{}", "r".repeat(18), "x".repeat(41));

    let name = generate_application_name(&repository, "web", "east");

    assert!(name.starts_with(&format!("{}-web-east-", "r".repeat(18))), "name: {name}");
    assert!(!name.contains("--"), "name: {name}");
    assert_hash_suffixed(&name);
}

#[test]
fn test_underscore_at_cut_is_dropped() {
    let chart = format!("{}_{}", "c".repeat(18), "y".repeat(40));

    let name = generate_application_name("svc", &chart, "east");

    assert!(!name.contains("--"), "name: {name}");
    assert!(name.starts_with(&format!("svc-{}-east-", "c".repeat(18))), "name: {name}");
}

#[test]
fn test_non_ascii_uppercase_is_lowercased() {
    assert_eq!(
        generate_application_name("Ärger", "Web", "Øst"),
        "ärger-web-øst"
    );
}
