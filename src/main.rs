use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::info;

use sku_forecast_api as api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = api::config::load_config().context("failed to load configuration")?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);
    api::handlers::health::init_start_time();
    info!(
        environment = %cfg.environment,
        log_level = cfg.log_level(),
        "Configuration loaded"
    );

    if cfg.should_allow_permissive_cors() && !cfg.has_cors_allowed_origins() {
        info!(
            "Using permissive CORS because explicit origins were not configured ({})",
            if cfg.is_development() {
                "development environment"
            } else {
                "explicit override enabled"
            }
        );
    }
    if let Some(seed) = cfg.random_seed {
        info!(seed, "Forecast randomness is seeded; responses are reproducible");
    }

    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", cfg.host, cfg.port))?;

    let state = api::AppState::new(cfg);
    info!(skus = state.catalog.len(), "Catalog seeded");
    let app = api::build_router(state);

    info!("🚀 sku-forecast-api listening on http://{}", addr);
    info!("   GET  /skus         - List available SKUs");
    info!("   POST /add-product  - Add new product");
    info!("   POST /predict      - Generate demand forecast");
    info!("   GET  /health       - Health check");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install signal handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
