//! HTTP surface for recognition.
//!
//! Routes:
//! - `GET /`, `GET /health` - liveness
//! - `POST /recognize`, `POST /api/recognize` - multipart clip upload
//!
//! The handlers only move bytes in and results out; all decisions live in
//! [`crate::recognition`].

mod handlers;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::{Error, Result, ResultExt};
use crate::recognition::RecognitionService;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: RecognitionService,
}

/// Build the router with CORS, tracing and the upload size limit applied.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = if config.cors_allow_any {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/", get(handlers::health))
        .route("/health", get(handlers::health))
        .route("/recognize", post(handlers::recognize))
        .route("/api/recognize", post(handlers::recognize))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(service: RecognitionService, config: &ServerConfig) -> Result<()> {
    let app = build_router(AppState { service }, config);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(format!("binding {}", config.bind))?;
    let addr = listener
        .local_addr()
        .map_err(|e| Error::server(e.to_string()))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context("serving HTTP")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
