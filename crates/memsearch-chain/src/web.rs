// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search stage: decision-gated web search, summarized for the final prompt.

use std::sync::Arc;

use memsearch_core::{MemsearchError, ProviderAdapter, SearchAdapter, SearchResult};
use memsearch_search::format_results;
use tracing::{info, warn};

use crate::decision::DecisionStage;
use crate::persistence::Persistence;
use crate::prompts::{NO_SEARCH_PERFORMED, summary_prompt};
use crate::stage::StageContext;

/// Formatted results of one web search.
#[derive(Debug, Clone)]
pub struct WebResults {
    pub results: Vec<SearchResult>,
    pub formatted: String,
}

/// Runs the decision stage, the search port and the summarization call.
#[derive(Clone)]
pub struct SearchStage {
    decision: DecisionStage,
    provider: Arc<dyn ProviderAdapter>,
    search: Arc<dyn SearchAdapter>,
    persistence: Persistence,
    max_results: usize,
}

impl SearchStage {
    pub fn new(
        provider: Arc<dyn ProviderAdapter>,
        search: Arc<dyn SearchAdapter>,
        persistence: Persistence,
        max_results: usize,
    ) -> Self {
        Self {
            decision: DecisionStage::new(provider.clone()),
            provider,
            search,
            persistence,
            max_results,
        }
    }

    /// Search `query`, format the hits and persist them.
    ///
    /// An empty result set is still persisted, as the no-results line.
    pub async fn run(&self, query: &str) -> Result<WebResults, MemsearchError> {
        info!(query = %query, "performing web search");
        let results = self.search.search(query, self.max_results).await?;
        let formatted = format_results(query, &results);
        self.persistence
            .store_search(query, &formatted, &results)
            .await;
        Ok(WebResults { results, formatted })
    }

    /// Context for the final prompt.
    ///
    /// Never fails: a failed decision falls back to "no search", a failed
    /// search becomes a `Search failed: ...` line, and a failed summary
    /// falls back to the raw formatted results.
    pub async fn maybe_search(&self, question: &str) -> StageContext {
        let decision = match self.decision.decide(question).await {
            Ok(decision) => decision,
            Err(e) => {
                warn!(error = %e, "search decision failed, skipping web search");
                return StageContext::degraded(NO_SEARCH_PERFORMED, e.to_string());
            }
        };

        if !decision.perform_search {
            return StageContext::skipped(NO_SEARCH_PERFORMED);
        }

        let web = match self.run(&decision.search_query).await {
            Ok(web) => web,
            Err(e) => {
                warn!(error = %e, query = %decision.search_query, "web search failed");
                return StageContext::degraded(failure_text(&e), e.to_string());
            }
        };

        match self
            .provider
            .generate(&summary_prompt(question, &web.formatted), None)
            .await
        {
            Ok(summary) if web.results.is_empty() => StageContext::empty(summary),
            Ok(summary) => StageContext::supplied(summary),
            Err(e) => {
                warn!(error = %e, "search summary failed, using raw results");
                StageContext::degraded(web.formatted, e.to_string())
            }
        }
    }

    /// Direct search used by the API and console: formatted results, or the
    /// failure line.
    pub async fn search_text(&self, query: &str) -> String {
        match self.run(query).await {
            Ok(web) => web.formatted,
            Err(e) => {
                warn!(error = %e, query = %query, "web search failed");
                failure_text(&e)
            }
        }
    }
}

/// `Search failed: <reason>` without the error-kind prefix.
pub fn failure_text(e: &MemsearchError) -> String {
    match e {
        MemsearchError::Search { message, .. } => format!("Search failed: {message}"),
        other => format!("Search failed: {other}"),
    }
}
