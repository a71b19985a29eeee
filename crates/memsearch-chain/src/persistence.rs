// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable writes to the memory store.
//!
//! Writes never fail the caller: errors are logged and swallowed.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use memsearch_core::{MemoryAdapter, Metadata, SearchResult, SourceType};
use serde_json::{Value, json};
use tracing::{debug, error};

/// Writes conversation and search records.
#[derive(Clone)]
pub struct Persistence {
    memory: Arc<dyn MemoryAdapter>,
}

impl Persistence {
    pub fn new(memory: Arc<dyn MemoryAdapter>) -> Self {
        Self { memory }
    }

    /// Store a completed exchange as one conversation record.
    pub async fn store_interaction(&self, question: &str, answer: &str) -> Option<String> {
        let text = format!("User: {question}\n\nAssistant: {answer}");
        let mut metadata = stamped(SourceType::Conversation);
        metadata.insert("type".into(), json!("interaction"));
        metadata.insert("query".into(), json!(question));

        match self.memory.add(&text, metadata).await {
            Ok(id) => {
                debug!(id = %id, "stored interaction in memory");
                Some(id)
            }
            Err(e) => {
                error!(error = %e, "error storing interaction in memory");
                None
            }
        }
    }

    /// Store formatted search results with their URLs.
    pub async fn store_search(
        &self,
        query: &str,
        formatted: &str,
        results: &[SearchResult],
    ) -> Option<String> {
        let mut metadata = stamped(SourceType::Search);
        metadata.insert("query".into(), json!(query));
        metadata.insert(
            "urls".into(),
            Value::Array(results.iter().map(|r| json!(r.url)).collect()),
        );
        metadata.insert("result_count".into(), json!(results.len()));

        match self.memory.add(formatted, metadata).await {
            Ok(id) => {
                debug!(id = %id, query = %query, "stored search results in memory");
                Some(id)
            }
            Err(e) => {
                error!(error = %e, "error storing search results in memory");
                None
            }
        }
    }
}

/// Metadata carrying the write time (RFC 3339, UTC) and the record origin.
fn stamped(source: SourceType) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert(
        "timestamp".into(),
        json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    metadata.insert("source_type".into(), json!(source.to_string()));
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamped_metadata_has_timestamp_and_source() {
        let metadata = stamped(SourceType::Search);
        assert_eq!(metadata["source_type"], "search");
        let ts = metadata["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok(), "got: {ts}");
    }
}
