// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end chain tests.
//!
//! `TestHarness` wires an [`Orchestrator`] over the three mocks and keeps a
//! handle on each of them, so a test can script the ports, drive a turn
//! and then assert on what every port saw.

use std::sync::Arc;
use std::time::Duration;

use memsearch_chain::{ChainSettings, Orchestrator};
use memsearch_config::MemsearchConfig;
use memsearch_core::types::{MemoryRecord, SearchResult};

use crate::mock_memory::MockMemory;
use crate::mock_provider::MockProvider;
use crate::mock_search::MockSearch;

/// Builder for test environments.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    records: Vec<MemoryRecord>,
    search: MockSearch,
    system_prompt: Option<String>,
    config: MemsearchConfig,
    response_delay: Option<Duration>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            records: Vec::new(),
            search: MockSearch::new(),
            system_prompt: None,
            config: MemsearchConfig::default(),
            response_delay: None,
        }
    }

    /// Scripted model replies, consumed in call order.
    pub fn with_mock_responses<S: Into<String>>(
        mut self,
        responses: impl IntoIterator<Item = S>,
    ) -> Self {
        self.responses = responses.into_iter().map(Into::into).collect();
        self
    }

    /// Hold every model reply for `delay`, keeping turns in flight.
    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = Some(delay);
        self
    }

    /// Records the memory store answers searches from.
    pub fn with_memory_records(mut self, records: impl IntoIterator<Item = MemoryRecord>) -> Self {
        self.records = records.into_iter().collect();
        self
    }

    /// Hits the search backend returns for every query.
    pub fn with_search_results(mut self, results: impl IntoIterator<Item = SearchResult>) -> Self {
        self.search = MockSearch::with_results(results);
        self
    }

    /// Use a specific search mock, e.g. [`MockSearch::timing_out`].
    pub fn with_search(mut self, search: MockSearch) -> Self {
        self.search = search;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Start from a full configuration; chain settings derive from it.
    pub fn with_config(mut self, config: MemsearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_memory_gate(mut self, enabled: bool) -> Self {
        self.config.search.memory_gate = enabled;
        self
    }

    pub fn build(self) -> TestHarness {
        let mut provider = MockProvider::with_responses(self.responses);
        if let Some(delay) = self.response_delay {
            provider = provider.with_delay(delay);
        }
        let provider = Arc::new(provider);
        let memory = Arc::new(MockMemory::with_records(self.records));
        let search = Arc::new(self.search);

        let settings = ChainSettings::from_config(&self.config);
        let mut orchestrator = Orchestrator::new(
            provider.clone(),
            memory.clone(),
            search.clone(),
            settings,
        )
        .with_name(self.config.agent.name.clone());
        if let Some(prompt) = self.system_prompt {
            orchestrator = orchestrator.with_system_prompt(prompt);
        }

        TestHarness {
            provider,
            memory,
            search,
            orchestrator: Arc::new(orchestrator),
            config: self.config,
        }
    }
}

/// An orchestrator over mock ports, with the mocks exposed for assertions.
pub struct TestHarness {
    pub provider: Arc<MockProvider>,
    pub memory: Arc<MockMemory>,
    pub search: Arc<MockSearch>,
    pub orchestrator: Arc<Orchestrator>,
    pub config: MemsearchConfig,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Run one turn through the orchestrator.
    pub async fn ask(&self, question: &str) -> String {
        self.orchestrator.invoke(question).await
    }
}
