// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock web search backend.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use memsearch_core::traits::{PluginAdapter, SearchAdapter};
use memsearch_core::types::{AdapterType, HealthStatus, SearchResult};
use memsearch_core::MemsearchError;

#[derive(Default)]
struct State {
    results: Vec<SearchResult>,
    failure: Option<String>,
    queries: Vec<(String, usize)>,
}

/// A search backend answering every query with the same hits.
///
/// Results are capped at `max_results` like the real backend. A configured
/// failure is returned as [`MemsearchError::Search`], which is also how a
/// timeout reaches the chain.
#[derive(Clone, Default)]
pub struct MockSearch {
    state: Arc<Mutex<State>>,
}

impl MockSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(results: impl IntoIterator<Item = SearchResult>) -> Self {
        let state = State {
            results: results.into_iter().collect(),
            ..State::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// A backend whose every search fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let state = State {
            failure: Some(message.into()),
            ..State::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// A backend that behaves as if every request timed out.
    pub fn timing_out() -> Self {
        Self::failing("Perplexica did not answer within 10s")
    }

    /// Every search call as `(query, max_results)`.
    pub async fn queries(&self) -> Vec<(String, usize)> {
        self.state.lock().await.queries.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.state.lock().await.queries.len()
    }
}

#[async_trait]
impl PluginAdapter for MockSearch {
    fn name(&self) -> &str {
        "mock-search"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Search
    }

    async fn health_check(&self) -> Result<HealthStatus, MemsearchError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl SearchAdapter for MockSearch {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, MemsearchError> {
        let mut state = self.state.lock().await;
        state.queries.push((query.to_string(), max_results));
        if let Some(message) = &state.failure {
            return Err(MemsearchError::search(message.clone()));
        }
        Ok(state.results.iter().take(max_results).cloned().collect())
    }
}
