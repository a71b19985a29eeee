// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The orchestrator: one query in, one answer out.

use std::sync::Arc;

use memsearch_config::MemsearchConfig;
use memsearch_core::{
    ChatTurn, HealthStatus, MemoryAdapter, MemoryRecord, MemsearchError, ProviderAdapter,
    SearchAdapter,
};
use memsearch_search::should_search;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::compose::{PromptContext, compose};
use crate::history::ChatHistory;
use crate::persistence::Persistence;
use crate::prompts::{NO_SEARCH_PERFORMED, default_system_prompt};
use crate::retrieval::{self, RetrievalStage};
use crate::stage::{StageContext, StageStatus};
use crate::web::SearchStage;

/// Stops the final generation before the model writes the next human turn.
const HUMAN_TURN_STOP: &str = "\nHuman:";

/// Tunables of the chain, taken from `[memory]` and `[search]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSettings {
    pub top_k: usize,
    pub similarity_threshold: f32,
    pub max_results: usize,
    pub search_threshold: f32,
    pub memory_gate: bool,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self::from_config(&MemsearchConfig::default())
    }
}

impl ChainSettings {
    pub fn from_config(config: &MemsearchConfig) -> Self {
        Self {
            top_k: config.memory.top_k,
            similarity_threshold: config.memory.similarity_threshold,
            max_results: config.search.max_results,
            search_threshold: config.search.search_threshold,
            memory_gate: config.search.memory_gate,
        }
    }
}

/// A successful turn and how each context source contributed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub memory: StageStatus,
    pub search: StageStatus,
}

/// Session façade over the three ports.
///
/// Owns the chat history. Turns are serialized: `invoke` holds the session
/// lock from retrieval until the interaction is persisted, and `reset`
/// waits for any turn in flight.
pub struct Orchestrator {
    name: String,
    system_prompt: String,
    /// Set once `with_system_prompt` replaced the default preamble.
    custom_prompt: bool,
    provider: Arc<dyn ProviderAdapter>,
    memory: Arc<dyn MemoryAdapter>,
    search: Arc<dyn SearchAdapter>,
    retrieval: RetrievalStage,
    web: SearchStage,
    persistence: Persistence,
    settings: ChainSettings,
    history: Mutex<ChatHistory>,
}

impl Orchestrator {
    /// Wire the stages over the given ports.
    pub fn new(
        provider: Arc<dyn ProviderAdapter>,
        memory: Arc<dyn MemoryAdapter>,
        search: Arc<dyn SearchAdapter>,
        settings: ChainSettings,
    ) -> Self {
        let persistence = Persistence::new(memory.clone());
        let retrieval = RetrievalStage::new(
            memory.clone(),
            settings.top_k,
            settings.similarity_threshold,
        );
        let web = SearchStage::new(
            provider.clone(),
            search.clone(),
            persistence.clone(),
            settings.max_results,
        );
        let name = "memsearch".to_string();

        Self {
            system_prompt: default_system_prompt(&name),
            custom_prompt: false,
            name,
            provider,
            memory,
            search,
            retrieval,
            web,
            persistence,
            settings,
            history: Mutex::new(ChatHistory::new()),
        }
    }

    /// Name used in log lines, error strings and the default preamble.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        if !self.custom_prompt {
            self.system_prompt = default_system_prompt(&self.name);
        }
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self.custom_prompt = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn settings(&self) -> &ChainSettings {
        &self.settings
    }

    /// Answer `query`, returning an `Error: ...` string instead of failing.
    ///
    /// On failure the chat history is left exactly as it was.
    pub async fn invoke(&self, query: &str) -> String {
        match self.try_invoke(query).await {
            Ok(answer) => answer.text,
            Err(e) => {
                error!(error = %e, "error invoking {} chain", self.name);
                format!("Error: error invoking {} chain: {e}", self.name)
            }
        }
    }

    /// Answer `query`. Only the final model call can fail the turn.
    pub async fn try_invoke(&self, query: &str) -> Result<Answer, MemsearchError> {
        let mut history = self.history.lock().await;

        let (memory, search) = self.gather(query).await;
        debug!(memory = ?memory.status, search = ?search.status, "context gathered");

        let prompt = compose(
            &self.system_prompt,
            &PromptContext {
                question: query,
                chat_history: history.turns(),
                memory_content: &memory.text,
                search_content: &search.text,
            },
        );

        let stop = [HUMAN_TURN_STOP.to_string()];
        let text = self.provider.generate(&prompt, Some(&stop)).await?;

        history.push_exchange(query, &text);
        self.persistence.store_interaction(query, &text).await;
        info!(history_len = history.len(), "turn complete");

        Ok(Answer {
            text,
            memory: memory.status,
            search: search.status,
        })
    }

    /// Memory and search context for `query`.
    ///
    /// Without the memory gate both stages run concurrently. With it,
    /// retrieval runs first and strong memory skips the web entirely.
    async fn gather(&self, query: &str) -> (StageContext, StageContext) {
        if !self.settings.memory_gate {
            return tokio::join!(
                self.retrieval.retrieve(query),
                self.web.maybe_search(query)
            );
        }

        let fetched = self.retrieval.fetch(query).await;
        let needs_web = match &fetched {
            Ok(records) => should_search(records, self.settings.search_threshold),
            Err(_) => true,
        };
        let memory = retrieval::render(fetched);

        let search = if needs_web {
            self.web.maybe_search(query).await
        } else {
            debug!("memory is strong enough, skipping web search");
            StageContext::skipped(NO_SEARCH_PERFORMED)
        };
        (memory, search)
    }

    /// Clear the chat history. Memory is untouched.
    pub async fn reset(&self) {
        self.history.lock().await.clear();
        info!("chat history reset");
    }

    /// Snapshot of the chat history.
    pub async fn history(&self) -> Vec<ChatTurn> {
        self.history.lock().await.turns().to_vec()
    }

    /// Memory records for `query` with the retrieval parameters, cut to `limit`.
    ///
    /// An empty query lists nothing.
    pub async fn memory_entries(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<MemoryRecord>, MemsearchError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let mut records = self
            .memory
            .search(
                query,
                self.settings.top_k,
                self.settings.similarity_threshold,
            )
            .await?;
        records.truncate(limit);
        Ok(records)
    }

    /// Direct web search: formatted results (persisted) or a failure line.
    pub async fn web_search(&self, query: &str) -> String {
        self.web.search_text(query).await
    }

    /// Health of every port, by adapter name.
    pub async fn health(&self) -> Vec<(String, HealthStatus)> {
        let checks = [
            (self.provider.name(), self.provider.health_check().await),
            (self.memory.name(), self.memory.health_check().await),
            (self.search.name(), self.search.health_check().await),
        ];
        checks
            .into_iter()
            .map(|(name, result)| {
                let status = result.unwrap_or_else(|e| HealthStatus::Unhealthy(e.to_string()));
                (name.to_string(), status)
            })
            .collect()
    }
}
