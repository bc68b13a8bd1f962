//! Common test utilities for reconciler tests
//!
//! Provides a mocked API server (a `tower_test` handle behind a real
//! `kube::Client`) and Component fixtures.

use component_operator::config::ControllerConfig;
use component_operator::controller::reconciler::Reconciler;
use component_operator::crd::Component;
use http::{Method, Request, Response, StatusCode};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use serde_json::{json, Value};
use std::sync::Arc;

pub const NAMESPACE: &str = "dev";
pub const NAME: &str = "myapp";
pub const UID: &str = "5d1b7a3e-8c1f-4f7e-9a53-3f0c2b6d9e41";
pub const RESOURCE_VERSION: &str = "1001";

pub type ApiServerHandle = tower_test::mock::Handle<Request<Body>, Response<Body>>;

/// Scripted API server; each handler consumes exactly one request
pub struct ApiServerVerifier(ApiServerHandle);

/// A reconcile context whose client talks to the returned verifier
pub fn testcontext() -> (Arc<Reconciler>, ApiServerVerifier) {
    let (mock_service, handle) = tower_test::mock::pair::<Request<Body>, Response<Body>>();
    let client = Client::new(mock_service, NAMESPACE);
    let config = ControllerConfig {
        error_backoff_min_secs: 5,
        error_backoff_max_secs: 300,
        ..ControllerConfig::default()
    };
    (
        Arc::new(Reconciler::new(client, config)),
        ApiServerVerifier(handle),
    )
}

/// Component as the API server would return it
pub fn component_json(build_type: &str) -> Value {
    json!({
        "apiVersion": "devopsconsole.openshift.io/v1alpha1",
        "kind": "Component",
        "metadata": {
            "name": NAME,
            "namespace": NAMESPACE,
            "uid": UID,
            "resourceVersion": RESOURCE_VERSION,
            "generation": 1,
            "creationTimestamp": "2026-10-01T09:30:00Z"
        },
        "spec": {
            "buildType": build_type,
            "codebase": "https://github.com/nodeshift-starters/nodejs-rest-http"
        }
    })
}

pub fn component(value: &Value) -> Arc<Component> {
    Arc::new(serde_json::from_value(value.clone()).expect("valid component fixture"))
}

pub async fn timeout_after_1s(handle: tokio::task::JoinHandle<()>) {
    tokio::time::timeout(std::time::Duration::from_secs(1), handle)
        .await
        .expect("timeout on mock apiserver")
        .expect("scenario succeeded");
}

fn json_response(status: StatusCode, body: &Value) -> Response<Body> {
    Response::builder()
        .status(status)
        .body(Body::from(serde_json::to_vec(body).expect("serializable response")))
        .expect("valid response")
}

fn status_failure(code: u16, reason: &str, message: &str) -> Value {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
}

fn failure_reason(status: StatusCode) -> &'static str {
    match status {
        StatusCode::CONFLICT => "AlreadyExists",
        StatusCode::NOT_FOUND => "NotFound",
        StatusCode::FORBIDDEN => "Forbidden",
        _ => "InternalError",
    }
}

async fn body_json(request: Request<Body>) -> Value {
    let bytes = request
        .into_body()
        .collect()
        .await
        .expect("readable request body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json request body")
}

impl ApiServerVerifier {
    /// Run a scenario in the background
    ///
    /// Await the handle with [`timeout_after_1s`] so missing calls fail the test.
    pub fn run<F, Fut>(self, scenario: F) -> tokio::task::JoinHandle<()>
    where
        F: FnOnce(Self) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Self> + Send + 'static,
    {
        tokio::spawn(async move {
            scenario(self).await.expect_no_more_requests().await;
        })
    }

    /// Answer the Component GET with `component`
    pub async fn handle_get(mut self, component: Value) -> Self {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.uri().path(), component_path());
        send.send_response(json_response(StatusCode::OK, &component));
        self
    }

    /// Answer the Component GET with 404
    pub async fn handle_get_not_found(mut self) -> Self {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::GET);
        send.send_response(json_response(
            StatusCode::NOT_FOUND,
            &status_failure(404, "NotFound", "components \"myapp\" not found"),
        ));
        self
    }

    /// Expect a create on `collection` and echo the object back
    ///
    /// Returns the posted object for further assertions.
    pub async fn handle_create(mut self, collection: &str) -> (Self, Value) {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.uri().path(), collection);
        let object = body_json(request).await;
        send.send_response(json_response(StatusCode::CREATED, &object));
        (self, object)
    }

    /// Expect a create on `collection` and reject it with 409
    pub async fn handle_create_conflict(self, collection: &str) -> Self {
        self.handle_create_error(collection, StatusCode::CONFLICT).await
    }

    /// Expect a create on `collection` and reject it with `status`
    pub async fn handle_create_error(mut self, collection: &str, status: StatusCode) -> Self {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.uri().path(), collection);
        let object = body_json(request).await;
        let name = object["metadata"]["name"].as_str().unwrap_or_default();
        let message = format!("create {name} rejected");
        send.send_response(json_response(
            status,
            &status_failure(status.as_u16(), failure_reason(status), &message),
        ));
        self
    }

    /// Expect a merge patch of the status subresource
    ///
    /// Responds with `component` carrying the patched status and returns the patch.
    pub async fn handle_status_patch(mut self, mut component: Value) -> (Self, Value) {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::PATCH);
        assert_eq!(request.uri().path(), format!("{}/status", component_path()));
        let content_type = request
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        assert_eq!(content_type.as_deref(), Some("application/merge-patch+json"));

        let patch = body_json(request).await;
        component["status"] = patch["status"].clone();
        component["metadata"]["resourceVersion"] = json!("1002");
        send.send_response(json_response(StatusCode::OK, &component));
        (self, patch)
    }

    /// Expect a merge patch of the status subresource and reject it with `status`
    ///
    /// Returns the rejected patch.
    pub async fn handle_status_patch_error(mut self, status: StatusCode) -> (Self, Value) {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::PATCH);
        assert_eq!(request.uri().path(), format!("{}/status", component_path()));
        let patch = body_json(request).await;
        send.send_response(json_response(
            status,
            &status_failure(status.as_u16(), failure_reason(status), "status write rejected"),
        ));
        (self, patch)
    }

    /// Passes once every client handle is dropped without further calls
    pub async fn expect_no_more_requests(mut self) {
        if let Some((request, _send)) = self.0.next_request().await {
            panic!(
                "unexpected request: {} {}",
                request.method(),
                request.uri().path()
            );
        }
    }
}

pub fn component_path() -> String {
    format!("/apis/devopsconsole.openshift.io/v1alpha1/namespaces/{NAMESPACE}/components/{NAME}")
}

pub fn image_streams_path() -> String {
    format!("/apis/image.openshift.io/v1/namespaces/{NAMESPACE}/imagestreams")
}

pub fn build_configs_path() -> String {
    format!("/apis/build.openshift.io/v1/namespaces/{NAMESPACE}/buildconfigs")
}
