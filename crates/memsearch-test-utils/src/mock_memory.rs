// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory stand-in for the memory store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use memsearch_core::traits::{MemoryAdapter, PluginAdapter};
use memsearch_core::types::{AdapterType, HealthStatus, MemoryRecord, Metadata};
use memsearch_core::MemsearchError;

/// Arguments of one `search` call.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySearchCall {
    pub query: String,
    pub top_k: usize,
    pub min_score: f32,
}

#[derive(Default)]
struct State {
    records: Vec<MemoryRecord>,
    writes: Vec<(String, Metadata)>,
    searches: Vec<MemorySearchCall>,
    add_failure: Option<String>,
    search_failure: Option<String>,
    unfiltered: bool,
}

/// A memory store holding pre-scored records.
///
/// `search` behaves like a similarity store: records scoring below
/// `min_score` are dropped and at most `top_k` are returned, in seeding
/// order. Writes are recorded but never become searchable, so every test
/// controls exactly what retrieval sees.
#[derive(Clone, Default)]
pub struct MockMemory {
    state: Arc<Mutex<State>>,
}

impl MockMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store answering every search from `records`.
    pub fn with_records(records: impl IntoIterator<Item = MemoryRecord>) -> Self {
        let state = State {
            records: records.into_iter().collect(),
            ..State::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Return every seeded record regardless of `min_score`.
    ///
    /// Lets tests observe whether callers filter scores themselves.
    pub async fn ignore_min_score(&self) {
        self.state.lock().await.unfiltered = true;
    }

    /// Make every `add` fail with `message`.
    pub async fn fail_adds(&self, message: impl Into<String>) {
        self.state.lock().await.add_failure = Some(message.into());
    }

    /// Make every `search` fail with `message`.
    pub async fn fail_searches(&self, message: impl Into<String>) {
        self.state.lock().await.search_failure = Some(message.into());
    }

    /// Every successful write as `(text, metadata)`, in call order.
    pub async fn writes(&self) -> Vec<(String, Metadata)> {
        self.state.lock().await.writes.clone()
    }

    /// Every search call, failed ones included.
    pub async fn searches(&self) -> Vec<MemorySearchCall> {
        self.state.lock().await.searches.clone()
    }
}

#[async_trait]
impl PluginAdapter for MockMemory {
    fn name(&self) -> &str {
        "mock-memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Memory
    }

    async fn health_check(&self) -> Result<HealthStatus, MemsearchError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl MemoryAdapter for MockMemory {
    async fn add(&self, text: &str, metadata: Metadata) -> Result<String, MemsearchError> {
        let mut state = self.state.lock().await;
        if let Some(message) = &state.add_failure {
            return Err(MemsearchError::memory(message.clone()));
        }
        state.writes.push((text.to_string(), metadata));
        Ok(format!("mem-{}", state.writes.len()))
    }

    async fn search(
        &self,
        query: &str,
        top_k: usize,
        min_score: f32,
    ) -> Result<Vec<MemoryRecord>, MemsearchError> {
        let mut state = self.state.lock().await;
        state.searches.push(MemorySearchCall {
            query: query.to_string(),
            top_k,
            min_score,
        });
        if let Some(message) = &state.search_failure {
            return Err(MemsearchError::memory(message.clone()));
        }

        let unfiltered = state.unfiltered;
        Ok(state
            .records
            .iter()
            .filter(|r| unfiltered || r.score.unwrap_or(0.0) >= min_score)
            .take(top_k)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scored_record;

    #[tokio::test]
    async fn search_applies_min_score_and_top_k() {
        let memory = MockMemory::with_records([
            scored_record("a", "alpha", 0.9),
            scored_record("b", "beta", 0.4),
            scored_record("c", "gamma", 0.8),
            scored_record("d", "delta", 0.75),
        ]);

        let hits = memory.search("q", 2, 0.7).await.unwrap();
        let ids: Vec<_> = hits.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(
            memory.searches().await,
            [MemorySearchCall {
                query: "q".into(),
                top_k: 2,
                min_score: 0.7
            }]
        );
    }

    #[tokio::test]
    async fn ignore_min_score_returns_low_scores() {
        let memory = MockMemory::with_records([scored_record("b", "beta", 0.1)]);
        memory.ignore_min_score().await;
        assert_eq!(memory.search("q", 5, 0.7).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn writes_are_recorded_and_not_searchable() {
        let memory = MockMemory::new();
        let id = memory.add("hello", Metadata::new()).await.unwrap();
        assert_eq!(id, "mem-1");
        assert_eq!(memory.writes().await.len(), 1);
        assert!(memory.search("hello", 5, 0.0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn injected_failures_surface_as_memory_errors() {
        let memory = MockMemory::new();
        memory.fail_adds("disk full").await;
        memory.fail_searches("index offline").await;

        let add = memory.add("x", Metadata::new()).await.unwrap_err();
        assert!(matches!(add, MemsearchError::Memory { .. }));
        let search = memory.search("x", 1, 0.0).await.unwrap_err();
        assert!(search.to_string().contains("index offline"));
        assert!(memory.writes().await.is_empty());
        assert_eq!(memory.searches().await.len(), 1);
    }
}
