//! SKU Forecast API Library
//!
//! In-memory SKU catalog plus a stochastic 7-day demand forecast exposed over
//! HTTP.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod catalog;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod ml;
pub mod models;
pub mod openapi;
pub mod services;
pub mod tracing;

use axum::{http::HeaderValue, Router};
use std::{sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
};

use crate::catalog::CatalogStore;
use crate::ml::RandomSource;

// App state definition
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: config::AppConfig,
    pub catalog: Arc<CatalogStore>,
    pub services: handlers::AppServices,
}

impl AppState {
    /// State over the seed catalog, with randomness taken from `config.random_seed`
    pub fn new(config: config::AppConfig) -> Self {
        Self::with_catalog(config, CatalogStore::seeded())
    }

    pub fn with_catalog(config: config::AppConfig, catalog: CatalogStore) -> Self {
        let catalog = Arc::new(catalog);
        let services = handlers::AppServices::new(
            catalog.clone(),
            RandomSource::from_seed(config.random_seed),
        );
        Self {
            config,
            catalog,
            services,
        }
    }
}

/// Every HTTP endpoint, without middleware
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(handlers::products::product_routes())
        .merge(handlers::forecasts::forecast_routes())
        .merge(handlers::health::health_routes())
}

/// CORS policy derived from configuration: explicit origins win, otherwise
/// permissive (configuration validation rejects the remaining case).
pub fn cors_layer(cfg: &config::AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Full application router: endpoints, Swagger UI and middleware stack
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(api_routes())
        .merge(openapi::swagger_ui())
        .layer(crate::tracing::configure_http_tracing())
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
