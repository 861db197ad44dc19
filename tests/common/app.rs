//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use huespread::assets::AssetLoader;
use huespread::models::AppConfig;
use huespread::server::{build_router, create_app_state, AppState};
use huespread::services::RunStore;

/// Test application with router and direct access to state
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application using the embedded config
    pub fn new() -> Self {
        Self::with_state(create_app_state(&AssetLoader::new(None)))
    }

    /// Create a test application with a specific config
    pub fn with_config(config: AppConfig) -> Self {
        Self::with_state(AppState::new(config))
    }

    fn with_state(state: AppState) -> Self {
        // Build router using shared server module (same as production)
        let router = build_router(state.clone());
        Self { router, state }
    }

    pub fn store(&self) -> &RunStore {
        &self.state.store
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let builder = Request::post(path).header("Content-Type", "application/json");
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Make a POST request with a JSON value
    pub async fn post_value(&self, path: &str, body: &serde_json::Value) -> TestResponse {
        self.post_json(path, &body.to_string()).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Run a small seeded optimization and return the parsed report
    pub async fn optimize(&self, body: &serde_json::Value) -> serde_json::Value {
        let response = self.post_value("/api/optimize", body).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "optimize failed: {}",
            response.text()
        );
        response.json()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}
