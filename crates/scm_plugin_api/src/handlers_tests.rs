//! Tests for HTTP handlers

use super::*;
use crate::test_support::{app_state, business_app_source, FixtureSource};
use axum::http::StatusCode;
use scm_plugin_core::Error as CoreError;

fn body(json: &str) -> Bytes {
    Bytes::from(json.to_string())
}

#[tokio::test]
async fn test_healthz_returns_ok() {
    assert_eq!(healthz().await, "OK");
}

#[tokio::test]
async fn test_generate_path_mode_returns_single_parameter() {
    let state = app_state(FixtureSource::default());

    let Json(response) = generate_parameters(
        State(state),
        body(r#"{"input":{"parameters":{"path":"cluster1/apps/team-a/web"}}}"#),
    )
    .await
    .unwrap();

    let parameters = response.output.parameters;
    assert_eq!(parameters.len(), 1);
    assert_eq!(parameters[0].repository, "kubernetes-manifests");
    assert_eq!(parameters[0].namespace, "team-a");
    assert_eq!(parameters[0].chart_name, "web");
    assert_eq!(parameters[0].destination_name, "in-cluster");
    assert!(parameters[0].value_files.is_empty());
}

#[tokio::test]
async fn test_generate_matrix_mode_expands_charts() {
    let state = app_state(business_app_source());

    let Json(response) = generate_parameters(
        State(state),
        body(
            r#"{"input":{"parameters":{
                "url":"git@github.com:acme/svc1.git",
                "repository":"svc1",
                "organization":"acme",
                "envs":["staging"]
            }}}"#,
        ),
    )
    .await
    .unwrap();

    let parameters = response.output.parameters;
    assert_eq!(parameters.len(), 1);
    let parameter = &parameters[0];
    assert_eq!(parameter.namespace, "svc1");
    assert_eq!(parameter.env, "staging");
    assert_eq!(parameter.chart_path, "deployment/k8s/base/web");
    assert_eq!(parameter.cluster, "in-cluster");
    assert_eq!(
        parameter.value_files,
        vec!["values.yaml", "../../staging/web/values.yaml"]
    );
    assert_eq!(parameter.application_name, "svc1-web-in-cluster");
}

#[tokio::test]
async fn test_generate_invalid_json_is_invalid_body() {
    let state = app_state(FixtureSource::default());

    let err = generate_parameters(State(state), body("{not json"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidBody(_)));
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_without_mode_is_bad_request() {
    let state = app_state(FixtureSource::default());

    let err = generate_parameters(State(state), body(r#"{"input":{"parameters":{}}}"#))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Generation(CoreError::InvalidRequest(_))
    ));
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_business_app_path_is_internal_error() {
    let state = app_state(FixtureSource::default());

    let err = generate_parameters(
        State(state),
        body(
            r#"{"input":{"parameters":{
                "path":"deployment/k8s/staging/web",
                "repoURL":"git@github.com:acme/svc1.git"
            }}}"#,
        ),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Generation(CoreError::UnsupportedOperation(_))
    ));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_fallback_rejects_non_post() {
    let state = app_state(FixtureSource::default());

    let err = fallback(
        State(state),
        Method::GET,
        Uri::from_static("/something"),
        Bytes::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::MethodNotAllowed));
}

#[tokio::test]
async fn test_fallback_serves_post_as_plugin_request() {
    let state = app_state(FixtureSource::default());

    let Json(response) = fallback(
        State(state),
        Method::POST,
        Uri::from_static("/api/v2/getparams"),
        body(r#"{"input":{"parameters":{"path":"c1/infra/monitoring/grafana"}}}"#),
    )
    .await
    .unwrap();

    assert_eq!(response.output.parameters.len(), 1);
    assert_eq!(response.output.parameters[0].chart_name, "grafana");
}
