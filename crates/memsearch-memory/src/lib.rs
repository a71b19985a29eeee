// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenMemory adapter.
//!
//! Implements [`MemoryAdapter`] over the OpenMemory REST API. All records
//! live in one collection, created on [`OpenMemoryStore::connect`] when
//! missing.

pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use memsearch_config::{MemoryConfig, SimilarityMetric};
use memsearch_core::error::MemsearchError;
use memsearch_core::traits::{MemoryAdapter, PluginAdapter};
use memsearch_core::types::{AdapterType, HealthStatus, MemoryRecord, Metadata};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::types::{
    AddMemory, AddMemoryResponse, CollectionList, CreateCollection, SearchRequest, SearchResponse,
};

/// OpenMemory-backed memory store.
#[derive(Debug, Clone)]
pub struct OpenMemoryStore {
    client: reqwest::Client,
    base_url: String,
    collection: String,
    metric: SimilarityMetric,
}

impl OpenMemoryStore {
    /// Connects to the store described by `config`, creating its collection
    /// if it does not exist yet.
    pub async fn connect(config: &MemoryConfig) -> Result<Self, MemsearchError> {
        Self::connect_to(config, config.base_url()).await
    }

    /// Like [`connect`](Self::connect), against an explicit base URL.
    pub async fn connect_to(
        config: &MemoryConfig,
        base_url: impl Into<String>,
    ) -> Result<Self, MemsearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MemsearchError::Memory {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let store = Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            collection: config.collection_name.clone(),
            metric: config.similarity_metric,
        };
        store.ensure_collection().await?;
        info!(collection = %store.collection, url = %store.base_url, "using memory collection");
        Ok(store)
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    async fn ensure_collection(&self) -> Result<(), MemsearchError> {
        let url = format!("{}/collections", self.base_url);
        let existing: CollectionList = self.send(self.client.get(&url), &url).await?;
        if existing.contains(&self.collection) {
            return Ok(());
        }

        info!(collection = %self.collection, "creating memory collection");
        let mut metadata = Metadata::new();
        metadata.insert(
            "description".into(),
            "memsearch conversation history".into(),
        );
        let body = CreateCollection {
            name: &self.collection,
            metadata,
        };
        self.send_discarding(self.client.post(&url).json(&body), &url)
            .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<T, MemsearchError> {
        let response = self.checked(request, url).await?;
        response.json().await.map_err(|e| MemsearchError::Memory {
            message: format!("failed to parse response from {url}: {e}"),
            source: Some(Box::new(e)),
        })
    }

    async fn send_discarding(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<(), MemsearchError> {
        self.checked(request, url).await.map(drop)
    }

    async fn checked(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<reqwest::Response, MemsearchError> {
        let response = request.send().await.map_err(|e| MemsearchError::Memory {
            message: format!("request to {url} failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match status {
            StatusCode::NOT_FOUND => format!("{url} not found: {body}"),
            _ => format!("OpenMemory returned {status} for {url}: {body}"),
        };
        Err(MemsearchError::memory(message))
    }
}

#[async_trait]
impl PluginAdapter for OpenMemoryStore {
    fn name(&self) -> &str {
        "openmemory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Memory
    }

    async fn health_check(&self) -> Result<HealthStatus, MemsearchError> {
        let url = format!("{}/collections", self.base_url);
        match self.send::<CollectionList>(self.client.get(&url), &url).await {
            Ok(list) if list.contains(&self.collection) => Ok(HealthStatus::Healthy),
            Ok(_) => Ok(HealthStatus::Degraded(format!(
                "collection {} is missing",
                self.collection
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl MemoryAdapter for OpenMemoryStore {
    async fn add(&self, text: &str, metadata: Metadata) -> Result<String, MemsearchError> {
        let url = format!("{}/collections/{}/memories", self.base_url, self.collection);
        let body = AddMemory {
            text,
            metadata: &metadata,
        };
        let created: AddMemoryResponse = self.send(self.client.post(&url).json(&body), &url).await?;
        debug!(id = %created.id, "added memory");
        Ok(created.id)
    }

    async fn search(
        &self,
        query: &str,
        top_k: usize,
        min_score: f32,
    ) -> Result<Vec<MemoryRecord>, MemsearchError> {
        let url = format!("{}/collections/{}/search", self.base_url, self.collection);
        let body = SearchRequest {
            query,
            limit: top_k,
            min_score,
            metric: self.metric.to_string(),
        };
        let found: SearchResponse = self.send(self.client.post(&url).json(&body), &url).await?;
        debug!(count = found.results.len(), "memory search complete");
        Ok(found.results.into_iter().map(MemoryRecord::from).collect())
    }
}
