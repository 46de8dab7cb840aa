#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use resort_api::config::ServerConfig;
use resort_api::router::build_app_router;
use resort_api::state::AppState;
use resort_core::images::LocalImageStore;
use resort_db::store::{MemoryStore, ResortStore};
use serde_json::Value;
use tower::ServiceExt;

pub const BASE_URL: &str = "http://resort.test";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_base_url: BASE_URL.to_string(),
        upload_dir: upload_dir.to_path_buf(),
    }
}

/// A running test application: the router plus handles on its
/// collaborators so tests can seed and inspect them directly.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub uploads: tempfile::TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Create a file in the upload directory, as the upload service would.
    pub fn put_image(&self, name: &str) {
        std::fs::write(self.uploads.path().join(name), b"jpeg").unwrap();
    }

    pub fn image_exists(&self, name: &str) -> bool {
        self.uploads.path().join(name).exists()
    }
}

/// Build the full application router with all middleware layers, backed by
/// an in-memory store and a temporary upload directory.
pub fn build_test_app() -> TestApp {
    let uploads = tempfile::tempdir().unwrap();
    let config = test_config(uploads.path());
    let store = Arc::new(MemoryStore::new());

    let state = AppState {
        store: store.clone() as Arc<dyn ResortStore>,
        images: Arc::new(LocalImageStore::new(uploads.path())),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        uploads,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Create an amenity through the owner API and return its JSON view.
pub async fn create_amenity(app: Router, body: Value) -> Value {
    let response = post_json(app, "/api/v1/owner/amenities", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
