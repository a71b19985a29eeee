// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Web search port.

use async_trait::async_trait;

use crate::error::MemsearchError;
use crate::traits::adapter::PluginAdapter;
use crate::types::SearchResult;

/// Adapter for a web search backend.
#[async_trait]
pub trait SearchAdapter: PluginAdapter {
    /// Runs a search and returns at most `max_results` hits.
    ///
    /// Timeouts are reported as [`MemsearchError::Search`].
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, MemsearchError>;
}
