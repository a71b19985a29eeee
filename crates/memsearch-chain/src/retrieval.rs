// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retrieval stage: memory records relevant to the question.

use std::sync::Arc;

use memsearch_core::{MemoryAdapter, MemoryRecord, MemsearchError};
use tracing::{info, warn};

use crate::prompts::NO_MEMORY;
use crate::stage::StageContext;

/// Queries the memory store with fixed retrieval parameters.
#[derive(Clone)]
pub struct RetrievalStage {
    memory: Arc<dyn MemoryAdapter>,
    top_k: usize,
    min_score: f32,
}

impl RetrievalStage {
    pub fn new(memory: Arc<dyn MemoryAdapter>, top_k: usize, min_score: f32) -> Self {
        Self {
            memory,
            top_k,
            min_score,
        }
    }

    /// Raw store results. `min_score` goes to the store verbatim and the
    /// records come back in the store's order, unfiltered.
    pub async fn fetch(&self, question: &str) -> Result<Vec<MemoryRecord>, MemsearchError> {
        let records = self
            .memory
            .search(question, self.top_k, self.min_score)
            .await?;
        info!(count = records.len(), "retrieved memory records");
        Ok(records)
    }

    /// Fetch and render in one step.
    pub async fn retrieve(&self, question: &str) -> StageContext {
        render(self.fetch(question).await)
    }
}

/// Render a fetch outcome as prompt context.
///
/// Record texts are joined by a blank line. No records, or a failed
/// fetch, render as the no-memory sentinel.
pub fn render(fetched: Result<Vec<MemoryRecord>, MemsearchError>) -> StageContext {
    match fetched {
        Ok(records) if records.is_empty() => StageContext::empty(NO_MEMORY),
        Ok(records) => StageContext::supplied(
            records
                .iter()
                .map(|r| r.text.as_str())
                .collect::<Vec<_>>()
                .join("\n\n"),
        ),
        Err(e) => {
            warn!(error = %e, "memory retrieval failed");
            StageContext::degraded(NO_MEMORY, e.to_string())
        }
    }
}
