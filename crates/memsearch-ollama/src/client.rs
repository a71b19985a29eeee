// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Ollama REST API.

use std::time::Duration;

use memsearch_core::MemsearchError;
use tracing::debug;

use crate::types::{ApiErrorResponse, GenerateRequest, GenerateResponse, TagsResponse};

/// Thin client over `/api/generate` and `/api/tags`.
///
/// No retries: a failed call is reported to the caller as-is.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// Creates a client for the runtime at `base_url` (e.g. `http://localhost:11434`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MemsearchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MemsearchError::Model {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Runs a non-streaming generation.
    pub async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, MemsearchError> {
        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        debug!(status = %status, model = %request.model, "generate response received");

        let body = response.text().await.map_err(|e| MemsearchError::Model {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(MemsearchError::model(format!(
                "Ollama returned {status}: {detail}"
            )));
        }

        serde_json::from_str(&body).map_err(|e| MemsearchError::Model {
            message: format!("failed to parse Ollama response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Lists the models the runtime has pulled.
    pub async fn tags(&self) -> Result<TagsResponse, MemsearchError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MemsearchError::model(format!(
                "Ollama returned {status} for /api/tags"
            )));
        }

        response.json().await.map_err(|e| MemsearchError::Model {
            message: format!("failed to parse Ollama tags: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

fn transport_error(url: &str, e: reqwest::Error) -> MemsearchError {
    let message = if e.is_timeout() {
        format!("request to {url} timed out")
    } else {
        format!("HTTP request to {url} failed: {e}")
    };
    MemsearchError::Model {
        message,
        source: Some(Box::new(e)),
    }
}
