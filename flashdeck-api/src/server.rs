//! HTTP server setup: middleware stack, listener, graceful shutdown

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use flashdeck_common::config::ServerConfig;
use sqlx::SqlitePool;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::{build_router, AppState};

/// CORS policy for the web app
///
/// With no configured origin every origin is allowed, which is what local
/// development and the browser extension need.
pub fn cors_layer(allowed_origin: Option<&str>) -> flashdeck_common::Result<CorsLayer> {
    let Some(origin) = allowed_origin else {
        return Ok(CorsLayer::permissive());
    };

    let origin = HeaderValue::from_str(origin).map_err(|e| {
        flashdeck_common::Error::Config(format!("Invalid allowed origin {:?}: {}", origin, e))
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

/// Router with CORS and request tracing applied
pub fn build_app(state: AppState, config: &ServerConfig) -> flashdeck_common::Result<Router> {
    let cors = cors_layer(config.allowed_origin.as_deref())?;

    Ok(build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// Bind the listener and serve until Ctrl+C or SIGTERM
pub async fn run(config: ServerConfig, pool: SqlitePool) -> anyhow::Result<()> {
    let app = build_app(AppState::new(pool.clone()), &config)?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("flashdeck-api listening on http://{}", addr);
    match &config.allowed_origin {
        Some(origin) => info!("CORS restricted to {}", origin),
        None => info!("CORS permissive (no allowed origin configured)"),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on the first shutdown signal
///
/// A handler that fails to install never resolves, so the other one still
/// gets a chance.
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
