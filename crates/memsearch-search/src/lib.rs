// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Perplexica web search adapter.
//!
//! Implements [`SearchAdapter`] over Perplexica's `POST /search` endpoint and
//! provides the plain-text rendering the chain feeds to the model.

pub mod format;

use std::time::Duration;

use async_trait::async_trait;
use memsearch_config::SearchConfig;
use memsearch_core::error::MemsearchError;
use memsearch_core::traits::{PluginAdapter, SearchAdapter};
use memsearch_core::types::{AdapterType, HealthStatus, SearchResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use format::{format_results, should_search};

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    title: Option<String>,
    snippet: Option<String>,
    url: Option<String>,
}

impl From<RawResult> for SearchResult {
    fn from(raw: RawResult) -> Self {
        SearchResult {
            title: raw.title.unwrap_or_else(|| "No title".to_string()),
            snippet: raw
                .snippet
                .unwrap_or_else(|| "No snippet available".to_string()),
            url: raw.url.unwrap_or_else(|| "#".to_string()),
        }
    }
}

/// Perplexica-backed web search.
#[derive(Debug, Clone)]
pub struct PerplexicaSearch {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl PerplexicaSearch {
    pub fn new(config: &SearchConfig) -> Result<Self, MemsearchError> {
        Self::with_base_url(config, config.base_url())
    }

    pub fn with_base_url(
        config: &SearchConfig,
        base_url: impl Into<String>,
    ) -> Result<Self, MemsearchError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MemsearchError::Search {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(url = %base_url, timeout_secs = config.timeout_secs, "Perplexica search initialized");

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }
}

#[async_trait]
impl PluginAdapter for PerplexicaSearch {
    fn name(&self) -> &str {
        "perplexica"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Search
    }

    async fn health_check(&self) -> Result<HealthStatus, MemsearchError> {
        // Any HTTP answer means the service is up; only transport failures count.
        match self.client.get(&self.base_url).send().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl SearchAdapter for PerplexicaSearch {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, MemsearchError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&SearchRequest { query, max_results })
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    format!("Perplexica did not answer within {:?}", self.timeout)
                } else {
                    format!("Error searching with Perplexica: {e}")
                };
                MemsearchError::Search {
                    message,
                    source: Some(Box::new(e)),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MemsearchError::search(format!(
                "Error searching with Perplexica: {status} {body}"
            )));
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| MemsearchError::Search {
            message: format!("Error searching with Perplexica: invalid response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        debug!(count = parsed.results.len(), "search results received");
        Ok(parsed
            .results
            .into_iter()
            .take(max_results)
            .map(SearchResult::from)
            .collect())
    }
}
