#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use job_tracker::{build_router, config::Config, AppState};

/// Router wired to a data file inside its own temporary directory.
pub struct TestApp {
    pub router: Router,
    pub data_file: PathBuf,
    _dir: TempDir,
}

pub fn test_config(dir: &TempDir) -> Config {
    Config {
        data_file: dir.path().join("data").join("applications.json"),
        ..Config::default()
    }
}

pub fn build_test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let router = build_router(AppState::from_config(&config), &config).unwrap();

    TestApp {
        router,
        data_file: config.data_file,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Sends `body` verbatim, with a `Content-Type` only when one is given.
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Response {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> Response {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.request(Method::DELETE, uri, None).await
    }

    pub fn stored(&self) -> Value {
        let text = std::fs::read_to_string(&self.data_file).unwrap();
        serde_json::from_str(&text).unwrap()
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Serve the real router on an ephemeral port and return the API base URL.
pub async fn spawn_server() -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let router = build_router(AppState::from_config(&config), &config).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (dir, format!("http://{}/api", addr))
}
