use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use serde_json::Value;
use sku_forecast_api::{build_router, config::AppConfig, AppState};
use tower::ServiceExt;

/// Helper harness that drives the full router in-process.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Seed catalog with a fixed random seed.
    pub fn new() -> Self {
        Self::with_config(AppConfig {
            environment: "test".to_string(),
            random_seed: Some(2024),
            ..AppConfig::default()
        })
    }

    pub fn with_config(cfg: AppConfig) -> Self {
        let state = AppState::new(cfg);
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Send a request with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        self.send(builder.body(body).expect("failed to build request"))
            .await
    }

    /// Send a request whose body is passed through untouched.
    pub async fn request_raw(&self, method: Method, uri: &str, raw: &'static str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(raw))
            .expect("failed to build request");
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
