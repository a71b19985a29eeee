// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! API server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use memsearch_chain::Orchestrator;
use memsearch_config::ApiConfig;
use memsearch_core::MemsearchError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    /// Reported by `/health`.
    pub version: &'static str,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>, config: &ApiConfig) -> Self {
        Self {
            orchestrator,
            version: env!("CARGO_PKG_VERSION"),
            auth: AuthConfig {
                bearer_token: config.token.clone(),
            },
        }
    }
}

/// Build the application router.
///
/// - GET /health (never authenticated)
/// - POST /chat, GET /memory, POST /search, POST /reset (bearer token when set)
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/chat", post(handlers::post_chat))
        .route("/memory", get(handlers::get_memory))
        .route("/search", post(handlers::post_search))
        .route("/reset", post(handlers::post_reset))
        .route_layer(axum_middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind to `host:port` and serve until the process is stopped.
pub async fn start_server(config: &ApiConfig, state: AppState) -> Result<(), MemsearchError> {
    if state.auth.bearer_token.is_none() {
        tracing::warn!("api.token is not set, the API is open to anyone who can reach it");
    }

    let app = router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| MemsearchError::Internal(format!("failed to bind API to {addr}: {e}")))?;

    tracing::info!("API server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| MemsearchError::Internal(format!("API server error: {e}")))?;

    Ok(())
}
