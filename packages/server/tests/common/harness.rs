//! Router harness for integration tests.
//!
//! Builds the real axum router over mock collaborators and drives it with
//! `tower::ServiceExt::oneshot`. No network, no external services.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use server_core::kernel::{ServerDeps, TestDependencies};
use server_core::server::build_app;
use tower::ServiceExt;

const MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

pub struct TestApp {
    /// Mocks behind the router; inspect them after a request.
    pub deps: TestDependencies,
    router: Router,
}

impl TestApp {
    pub fn new(deps: TestDependencies) -> Self {
        init_tracing();
        let router = build_app(deps.server_deps());
        Self { deps, router }
    }

    /// Router with every collaborator unset.
    pub fn unconfigured() -> Self {
        init_tracing();
        Self {
            deps: TestDependencies::new(),
            router: build_app(ServerDeps::unconfigured()),
        }
    }

    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), MAX_RESPONSE_BYTES)
            .await
            .expect("response body");

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.post_raw(uri, "application/json", body.to_string()).await
    }

    pub async fn post_raw(
        &self,
        uri: &str,
        content_type: &str,
        body: impl Into<Body>,
    ) -> TestResponse {
        self.request(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, content_type)
                .body(body.into())
                .unwrap(),
        )
        .await
    }

    pub async fn send(&self, method: Method, uri: &str) -> TestResponse {
        self.request(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// `multipart/form-data` upload of a single part.
    pub async fn upload(
        &self,
        field: &str,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> TestResponse {
        let boundary = "TEST-BOUNDARY-7f3a";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        self.post_raw(
            "/upload",
            &format!("multipart/form-data; boundary={boundary}"),
            body,
        )
        .await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response is not JSON ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Respect RUST_LOG in tests. Run with: RUST_LOG=debug cargo test -- --nocapture
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
