// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the OpenMemory REST API.

use memsearch_core::{MemoryRecord, Metadata};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
}

/// `GET /collections` accepts either a bare array or `{collections: [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CollectionList {
    Bare(Vec<CollectionInfo>),
    Wrapped { collections: Vec<CollectionInfo> },
}

impl CollectionList {
    pub fn contains(&self, name: &str) -> bool {
        let items = match self {
            Self::Bare(items) | Self::Wrapped { collections: items } => items,
        };
        items.iter().any(|c| c.name == name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCollection<'a> {
    pub name: &'a str,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddMemory<'a> {
    pub text: &'a str,
    pub metadata: &'a Metadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddMemoryResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub limit: usize,
    pub min_score: f32,
    pub metric: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub text: String,
    pub score: f32,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

impl From<SearchHit> for MemoryRecord {
    fn from(hit: SearchHit) -> Self {
        MemoryRecord {
            id: hit.id,
            text: hit.text,
            metadata: hit.metadata,
            score: Some(hit.score),
        }
    }
}
