use crate::config::Config;
use crate::upstream::{RecommenderApi, RecommenderClient};
use anyhow::Result;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

const MAX_BODY_BYTES: usize = 1024 * 1024; // 1MB safety cap
const RELAY_FAILURE: &str = "Failed to fetch recommendations";

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<dyn RecommenderApi>,
}

pub async fn run_server(config: Config) -> Result<()> {
    info!("Relaying searches to {}", config.upstream_url);
    let recommender: Arc<dyn RecommenderApi> =
        Arc::new(RecommenderClient::new(&config.upstream_url));
    let state = AppState { recommender };

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/tv", post(handle_search))
        .route("/health", get(health))
        .with_state(state)
        .fallback_service(ServeDir::new("static"))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "OK"
}

async fn handle_search(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<serde_json::Value>) {
    // The body goes through untouched; parsing only establishes that it is
    // forwardable JSON at all.
    if let Err(e) = serde_json::from_slice::<serde_json::Value>(&body) {
        error!("Search request body is not JSON: {}", e);
        return relay_failure();
    }

    match state.recommender.search(body).await {
        Ok(reply) => {
            let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::OK);
            // Upstream application errors keep their status instead of
            // masquerading as success; 2xx collapses to a plain 200.
            let status = if status.is_success() {
                StatusCode::OK
            } else {
                status
            };
            (status, Json(reply.body))
        }
        Err(e) => {
            error!("Failed to reach recommendation service: {:#}", e);
            relay_failure()
        }
    }
}

fn relay_failure() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": RELAY_FAILURE })),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        term.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
