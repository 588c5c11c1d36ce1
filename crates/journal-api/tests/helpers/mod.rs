//! Shared test helpers for router-level tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use journal_api::{AppState, build_dashboard_app, build_ingest_app};
use journal_core::config::AppConfig;
use journal_service::{IngestService, ReportService};
use journal_storage::{FolderLayout, LocalReportStore};

/// Boundary used by [`Multipart`] bodies.
pub const BOUNDARY: &str = "journal-test-boundary";

/// Collected response.
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    /// Body as UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8(self.bytes.clone()).expect("response body is not UTF-8")
    }

    /// Body as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).expect("response body is not JSON")
    }
}

/// Test application over a temporary reports root.
pub struct TestApp {
    /// Dashboard router.
    pub dashboard: Router,
    /// Ingest router.
    pub ingest: Router,
    /// Reports root; removed on drop.
    pub dir: TempDir,
}

impl TestApp {
    /// Create a new test application with default configuration.
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a new test application; `storage.reports_root` is replaced by
    /// a temporary directory.
    pub async fn with_config(mut config: AppConfig) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        config.storage.reports_root = dir.path().to_string_lossy().into_owned();

        let store = Arc::new(
            LocalReportStore::with_layout(dir.path(), FolderLayout::from_config(&config.storage))
                .await
                .expect("Failed to open report store"),
        );

        let state = AppState::new(
            config,
            ReportService::new(store.clone()),
            IngestService::new(store),
        );

        Self {
            dashboard: build_dashboard_app(state.clone()),
            ingest: build_ingest_app(state),
            dir,
        }
    }

    /// Reports root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file into a report folder, creating the folder.
    pub fn write_file(&self, folder: &str, file_name: &str, data: impl AsRef<[u8]>) {
        let folder = self.root().join(folder);
        std::fs::create_dir_all(&folder).expect("Failed to create folder");
        std::fs::write(folder.join(file_name), data).expect("Failed to write file");
    }

    /// Write a report XML document named after its folder.
    pub fn write_report(&self, folder: &str, xml: &str) {
        self.write_file(folder, &format!("{folder}.xml"), xml);
    }

    /// GET on the dashboard router.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");
        send(&self.dashboard, request).await
    }

    /// POST a raw body with a JSON content type on the dashboard router.
    pub async fn post_json(&self, uri: &str, body: impl Into<Body>) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .expect("Failed to build request");
        send(&self.dashboard, request).await
    }

    /// POST a multipart body on the ingest router.
    pub async fn upload(&self, body: Multipart) -> TestResponse {
        let body = body.finish();
        let request = Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body))
            .expect("Failed to build request");
        send(&self.ingest, request).await
    }
}

async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Router call failed");

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes()
        .to_vec();

    TestResponse {
        status,
        content_type,
        bytes,
    }
}

/// Minimal multipart/form-data body builder.
#[derive(Default)]
pub struct Multipart {
    body: Vec<u8>,
}

impl Multipart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file part.
    pub fn file(mut self, name: &str, file_name: &str, data: impl AsRef<[u8]>) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data.as_ref());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Add a plain text part.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
        self
    }

    fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}
