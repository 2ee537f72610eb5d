use super::*;

fn matrix_request() -> GenerationRequest {
    GenerationRequest {
        url: Some("git@github.com:acme/svc1.git".to_string()),
        repository: Some("svc1".to_string()),
        organization: Some("acme".to_string()),
        envs: vec!["staging".to_string()],
        ..Default::default()
    }
}

#[test]
fn test_path_mode_takes_priority() {
    let mut request = matrix_request();
    request.orgs = vec!["acme".to_string()];
    request.path = Some("cluster1/apps/team-a/web".to_string());

    assert_eq!(
        request.mode().unwrap(),
        GenerationMode::Path {
            path: "cluster1/apps/team-a/web",
            repo_url: None,
        }
    );
}

#[test]
fn test_path_mode_carries_repo_url() {
    let request = GenerationRequest {
        path: Some("apps/ns/chart".to_string()),
        repo_url: Some("https://github.com/acme/kubernetes-prod-west".to_string()),
        ..Default::default()
    };

    assert_eq!(
        request.mode().unwrap(),
        GenerationMode::Path {
            path: "apps/ns/chart",
            repo_url: Some("https://github.com/acme/kubernetes-prod-west"),
        }
    );
}

#[test]
fn test_matrix_mode_before_standalone() {
    let mut request = matrix_request();
    request.orgs = vec!["other".to_string()];

    assert_eq!(
        request.mode().unwrap(),
        GenerationMode::Matrix {
            url: "git@github.com:acme/svc1.git",
            repository: "svc1",
            organization: "acme",
        }
    );
}

#[test]
fn test_incomplete_matrix_fields_fall_through_to_standalone() {
    let mut request = matrix_request();
    request.organization = Some(String::new());
    request.orgs = vec!["acme".to_string()];

    assert!(matches!(
        request.mode().unwrap(),
        GenerationMode::Standalone { orgs } if orgs == ["acme".to_string()]
    ));
}

#[test]
fn test_no_mode_is_invalid_request() {
    let mut request = matrix_request();
    request.url = None;

    match request.mode() {
        Err(Error::InvalidRequest(message)) => {
            assert!(message.contains("'orgs'"));
            assert!(message.contains("'url'+'repository'+'organization'"));
            assert!(message.contains("'path'"));
        }
        other => panic!("Expected InvalidRequest, got {other:?}"),
    }
}

#[test]
fn test_empty_path_is_absent() {
    let request = GenerationRequest {
        path: Some(String::new()),
        ..Default::default()
    };

    assert!(request.mode().is_err());
}

#[test]
fn test_branch_or_default() {
    let mut request = GenerationRequest::default();
    assert_eq!(request.branch_or("main"), "main");

    request.branch = Some(String::new());
    assert_eq!(request.branch_or("main"), "main");

    request.branch = Some("release".to_string());
    assert_eq!(request.branch_or("main"), "release");
}
