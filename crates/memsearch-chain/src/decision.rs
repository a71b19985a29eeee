// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decision stage: should this question go to the web, and with what query?

use std::sync::Arc;

use memsearch_core::{MemsearchError, ProviderAdapter};
use tracing::debug;

use crate::prompts::{SEARCH_PREFIX, decision_prompt};

/// Outcome of the decision stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDecision {
    pub perform_search: bool,
    /// Refined query; empty when no search is performed.
    pub search_query: String,
}

impl SearchDecision {
    pub fn no_search() -> Self {
        Self {
            perform_search: false,
            search_query: String::new(),
        }
    }
}

/// Interpret a raw decision reply.
///
/// Only an exact, case-sensitive `SEARCH:` prefix at the very start requests
/// a search. Everything else, including a bare `SEARCH:` with no query,
/// means no search.
pub fn parse_decision(raw: &str) -> SearchDecision {
    match raw.strip_prefix(SEARCH_PREFIX).map(str::trim) {
        Some(query) if !query.is_empty() => SearchDecision {
            perform_search: true,
            search_query: query.to_string(),
        },
        _ => SearchDecision::no_search(),
    }
}

/// Asks the language model whether a web search is warranted.
#[derive(Clone)]
pub struct DecisionStage {
    provider: Arc<dyn ProviderAdapter>,
}

impl DecisionStage {
    pub fn new(provider: Arc<dyn ProviderAdapter>) -> Self {
        Self { provider }
    }

    /// One model call, no retry. Model failures are returned to the caller.
    pub async fn decide(&self, question: &str) -> Result<SearchDecision, MemsearchError> {
        let raw = self
            .provider
            .generate(&decision_prompt(question), None)
            .await?;
        let decision = parse_decision(&raw);
        debug!(
            perform_search = decision.perform_search,
            search_query = %decision.search_query,
            "search decision"
        );
        Ok(decision)
    }
}
