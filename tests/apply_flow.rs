//! End-to-end tests for the apply/delete/get flows against a mocked control
//! plane, exercising the registry, operation bindings, and outcome
//! classification together.

use std::io::Write;

use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{bearer_token, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use beamlit_cli::api::ApiClient;
use beamlit_cli::commands::{apply, delete, get};
use beamlit_cli::config::Context;
use beamlit_cli::error::Error;
use beamlit_cli::render::OutputFormat;
use beamlit_cli::resource::outcome::OutcomeStatus;
use beamlit_cli::resource::Registry;

fn registry_for(server: &MockServer) -> Registry {
    let client = ApiClient::new(&server.uri(), Some("acme"), Some("test-key"))
        .expect("client should build");
    Registry::new(&client)
}

fn manifest(text: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("tempfile");
    file.write_all(text.as_bytes()).expect("write manifest");
    file
}

fn context(server: &MockServer, output: OutputFormat) -> Context {
    Context {
        base_url: server.uri(),
        api_key: Some("test-key".to_string()),
        workspace: Some("acme".to_string()),
        environment: None,
        output,
    }
}

mod apply_tests {
    use super::*;

    #[tokio::test]
    async fn put_success_is_configured() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/models/alpha"))
            .and(header("X-Beamlit-Workspace", "acme"))
            .and(bearer_token("test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"displayName": "Alpha"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let file = manifest(
            "\
apiVersion: beamlit.com/v1alpha1
kind: Model
metadata:
  name: alpha
spec:
  displayName: Alpha
",
        );

        let registry = registry_for(&server);
        let outcomes = apply::run(&registry, file.path().to_str().unwrap(), false)
            .await
            .expect("apply should run");

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, OutcomeStatus::Configured);
        assert_eq!(outcomes[0].kind, "Model");
        assert_eq!(outcomes[0].name, "alpha");
        assert!(apply::all_succeeded(&outcomes));
    }

    #[tokio::test]
    async fn put_404_falls_back_to_post_created() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/models/alpha"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/models"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"displayName": "Alpha"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let file = manifest("kind: Model\nmetadata:\n  name: alpha\nspec: {}\n");

        let registry = registry_for(&server);
        let outcomes = apply::run(&registry, file.path().to_str().unwrap(), false)
            .await
            .expect("apply should run");

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, OutcomeStatus::Created);
    }

    #[tokio::test]
    async fn put_server_error_is_failed() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/models/alpha"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "internal"})),
            )
            .mount(&server)
            .await;

        let file = manifest("kind: Model\nmetadata:\n  name: alpha\nspec: {}\n");

        let registry = registry_for(&server);
        let outcomes = apply::run(&registry, file.path().to_str().unwrap(), false)
            .await
            .expect("apply should run");

        assert_eq!(outcomes[0].status, OutcomeStatus::Failed);
        assert!(!apply::all_succeeded(&outcomes));
    }

    #[tokio::test]
    async fn batch_isolates_a_failing_document() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/models/alpha"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/functions/gamma"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        // The middle document fails coercion: PolicySpec requires `type`.
        let file = manifest(
            "\
kind: Model
metadata:
  name: alpha
spec: {}
---
kind: Policy
metadata:
  name: beta
spec:
  flavors:
    - type: cpu
      name: small
---
kind: Function
metadata:
  name: gamma
spec: {}
",
        );

        let registry = registry_for(&server);
        let outcomes = apply::run(&registry, file.path().to_str().unwrap(), false)
            .await
            .expect("apply should run");

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].status, OutcomeStatus::Configured);
        assert_eq!(outcomes[1].status, OutcomeStatus::Failed);
        assert_eq!(outcomes[2].status, OutcomeStatus::Configured);
        assert!(!apply::all_succeeded(&outcomes));
    }

    #[tokio::test]
    async fn unregistered_kind_is_skipped() {
        let server = MockServer::start().await;

        let file = manifest("kind: Gadget\nmetadata:\n  name: x\nspec: {}\n");

        let registry = registry_for(&server);
        let outcomes = apply::run(&registry, file.path().to_str().unwrap(), false)
            .await
            .expect("apply should run");

        assert!(outcomes.is_empty());
        assert!(apply::all_succeeded(&outcomes));
    }

    #[tokio::test]
    async fn read_only_kind_fails_without_a_request() {
        // No mocks mounted: a request would 404 the mock server, but the
        // unsupported-operation check fires first.
        let server = MockServer::start().await;

        let file = manifest("kind: Workspace\nmetadata:\n  name: acme\nspec: {}\n");

        let registry = registry_for(&server);
        let outcomes = apply::run(&registry, file.path().to_str().unwrap(), false)
            .await
            .expect("apply should run");

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, OutcomeStatus::Failed);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn directory_requires_recursive_flag() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");

        let registry = registry_for(&server);
        let err = apply::run(&registry, dir.path().to_str().unwrap(), false)
            .await
            .expect_err("directory without -R should error");
        assert!(err.to_string().contains("-R"));
    }
}

mod delete_tests {
    use super::*;

    #[tokio::test]
    async fn delete_by_file_is_deleted() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/models/alpha"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let file = manifest("kind: Model\nmetadata:\n  name: alpha\nspec: {}\n");

        let registry = registry_for(&server);
        let outcomes = delete::run_file(&registry, file.path().to_str().unwrap())
            .await
            .expect("delete should run");

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, OutcomeStatus::Deleted);
    }

    #[tokio::test]
    async fn delete_by_name_resolves_aliases() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/models/alpha"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let registry = registry_for(&server);
        let outcome = delete::run_named(&registry, "ml", "alpha")
            .await
            .expect("kind should resolve");
        assert_eq!(outcome.status, OutcomeStatus::Deleted);
    }

    #[tokio::test]
    async fn delete_missing_resource_is_failed() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/models/alpha"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})),
            )
            .mount(&server)
            .await;

        let registry = registry_for(&server);
        let outcome = delete::run_named(&registry, "model", "alpha")
            .await
            .expect("kind should resolve");
        assert_eq!(outcome.status, OutcomeStatus::Failed);
    }

    #[tokio::test]
    async fn delete_unknown_kind_is_a_lookup_error() {
        let server = MockServer::start().await;

        let registry = registry_for(&server);
        let err = delete::run_named(&registry, "gadget", "x")
            .await
            .expect_err("unknown kind should error");
        assert!(matches!(err, Error::Lookup(_)));
    }
}

mod get_tests {
    use super::*;

    #[tokio::test]
    async fn list_renders_records() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "alpha", "workspace": "acme"},
                {"name": "beta", "workspace": "acme"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let registry = registry_for(&server);
        let ctx = context(&server, OutputFormat::Json);
        get::run(&registry, &ctx, "models", None)
            .await
            .expect("list should succeed");
    }

    #[tokio::test]
    async fn scoped_list_passes_environment_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .and(query_param("environment", "production"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let registry = registry_for(&server);
        let mut ctx = context(&server, OutputFormat::Table);
        ctx.environment = Some("production".to_string());
        get::run(&registry, &ctx, "models", None)
            .await
            .expect("list should succeed");
    }

    #[tokio::test]
    async fn get_named_http_error_aborts() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models/alpha"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})),
            )
            .mount(&server)
            .await;

        let registry = registry_for(&server);
        let ctx = context(&server, OutputFormat::Table);
        let err = get::run(&registry, &ctx, "model", Some("alpha"))
            .await
            .expect_err("404 should abort");
        assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn list_body_that_is_not_an_array_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let registry = registry_for(&server);
        let ctx = context(&server, OutputFormat::Table);
        let err = get::run(&registry, &ctx, "models", None)
            .await
            .expect_err("non-array body should abort");
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[tokio::test]
    async fn unknown_kind_is_a_lookup_error() {
        let server = MockServer::start().await;

        let registry = registry_for(&server);
        let ctx = context(&server, OutputFormat::Table);
        let err = get::run(&registry, &ctx, "gadgets", None)
            .await
            .expect_err("unknown kind should error");
        assert!(matches!(err, Error::Lookup(_)));
    }
}
