// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for memsearch integration tests.
//!
//! Mock implementations of the three ports plus a harness that wires them
//! into an [`Orchestrator`](memsearch_chain::Orchestrator), so the chain can
//! be driven without Ollama, OpenMemory or Perplexica running.
//!
//! - [`MockProvider`] - scripted model replies, records every prompt
//! - [`MockMemory`] - in-memory store with scored records, records every call
//! - [`MockSearch`] - scripted search results or failures
//! - [`TestHarness`] - all of the above behind one orchestrator

pub mod harness;
pub mod mock_memory;
pub mod mock_provider;
pub mod mock_search;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_memory::{MemorySearchCall, MockMemory};
pub use mock_provider::MockProvider;
pub use mock_search::MockSearch;

use memsearch_core::{MemoryRecord, SearchResult};

/// A scored record as a similarity search would return it.
pub fn scored_record(id: &str, text: &str, score: f32) -> MemoryRecord {
    MemoryRecord {
        id: id.to_string(),
        text: text.to_string(),
        metadata: Default::default(),
        score: Some(score),
    }
}

/// A search hit with every field set.
pub fn search_hit(title: &str, snippet: &str, url: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        snippet: snippet.to_string(),
        url: url.to_string(),
    }
}
