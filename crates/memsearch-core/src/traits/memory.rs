// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory store port.

use async_trait::async_trait;

use crate::error::MemsearchError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{MemoryRecord, Metadata};

/// Adapter for an append-only, similarity-searchable text store.
#[async_trait]
pub trait MemoryAdapter: PluginAdapter {
    /// Appends a record and returns the identifier the store assigned to it.
    async fn add(&self, text: &str, metadata: Metadata) -> Result<String, MemsearchError>;

    /// Returns at most `top_k` records scoring at least `min_score`, ranked by
    /// the store. Callers must not assume any ordering beyond the store's.
    async fn search(
        &self,
        query: &str,
        top_k: usize,
        min_score: f32,
    ) -> Result<Vec<MemoryRecord>, MemsearchError>;
}
