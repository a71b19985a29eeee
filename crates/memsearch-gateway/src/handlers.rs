// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.
//!
//! Handles GET /health, POST /chat, GET /memory, POST /search, POST /reset.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use memsearch_core::{Metadata, MemoryRecord};
use serde::{Deserialize, Serialize};

use crate::server::AppState;

const MISSING_QUERY: &str = "Missing 'query' field";

/// Request body for POST /chat and POST /search.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// Query string for GET /memory.
#[derive(Debug, Deserialize)]
pub struct MemoryParams {
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Adapter name to its health, e.g. `"ollama": "healthy"`.
    pub adapters: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct MemoryEntry {
    pub content: String,
    pub metadata: Metadata,
    pub score: Option<f32>,
}

impl From<MemoryRecord> for MemoryEntry {
    fn from(record: MemoryRecord) -> Self {
        Self {
            content: record.text,
            metadata: record.metadata,
            score: record.score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemoryResponse {
    pub entries: Vec<MemoryEntry>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: String,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub message: String,
    pub success: bool,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// The `query` of a JSON body, or the 400 response to send instead.
fn require_query(body: Result<Json<QueryRequest>, JsonRejection>) -> Result<String, Response> {
    match body {
        Ok(Json(QueryRequest { query: Some(query) })) => Ok(query),
        Ok(_) => Err(error_response(StatusCode::BAD_REQUEST, MISSING_QUERY)),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected request body");
            Err(error_response(StatusCode::BAD_REQUEST, MISSING_QUERY))
        }
    }
}

/// GET /health
///
/// Unauthenticated. Always 200; per-adapter health is informational.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let adapters = state
        .orchestrator
        .health()
        .await
        .into_iter()
        .map(|(name, status)| (name, status.to_string()))
        .collect();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: state.version.to_string(),
        adapters,
    })
}

/// POST /chat
pub async fn post_chat(
    State(state): State<AppState>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Response {
    let query = match require_query(body) {
        Ok(query) => query,
        Err(response) => return response,
    };

    let response = state.orchestrator.invoke(&query).await;
    Json(ChatResponse {
        response,
        success: true,
    })
    .into_response()
}

/// GET /memory?query=...&limit=10
pub async fn get_memory(
    State(state): State<AppState>,
    Query(params): Query<MemoryParams>,
) -> Response {
    match state
        .orchestrator
        .memory_entries(&params.query, params.limit)
        .await
    {
        Ok(records) => {
            let entries: Vec<MemoryEntry> = records.into_iter().map(Into::into).collect();
            Json(MemoryResponse {
                count: entries.len(),
                entries,
            })
            .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "error listing memory");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// POST /search
pub async fn post_search(
    State(state): State<AppState>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Response {
    let query = match require_query(body) {
        Ok(query) => query,
        Err(response) => return response,
    };

    let results = state.orchestrator.web_search(&query).await;
    Json(SearchResponse {
        results,
        success: true,
    })
    .into_response()
}

/// POST /reset
pub async fn post_reset(State(state): State<AppState>) -> Json<ResetResponse> {
    state.orchestrator.reset().await;
    Json(ResetResponse {
        message: "Chat history reset successfully".to_string(),
        success: true,
    })
}
