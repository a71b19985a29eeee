// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama language model adapter.
//!
//! Implements [`ProviderAdapter`] over Ollama's non-streaming
//! `/api/generate` endpoint with the sampling options from `[llm]`.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use memsearch_config::LlmConfig;
use memsearch_core::error::MemsearchError;
use memsearch_core::traits::{PluginAdapter, ProviderAdapter};
use memsearch_core::types::{AdapterType, HealthStatus};
use tracing::{debug, error, info};

use crate::client::OllamaClient;
use crate::types::{GenerateOptions, GenerateRequest};

/// Ollama-backed language model.
pub struct OllamaProvider {
    client: OllamaClient,
    model: String,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

impl OllamaProvider {
    /// Creates a provider for the runtime described by `config`.
    ///
    /// No request is made; an unreachable runtime surfaces on first use.
    pub fn new(config: &LlmConfig) -> Result<Self, MemsearchError> {
        Self::with_base_url(config, config.base_url())
    }

    /// Creates a provider that talks to `base_url` instead of `host:port`.
    pub fn with_base_url(
        config: &LlmConfig,
        base_url: impl Into<String>,
    ) -> Result<Self, MemsearchError> {
        let client = OllamaClient::new(base_url, Duration::from_secs(config.timeout_secs))?;
        info!(model = %config.model, url = %client.base_url(), "Ollama provider initialized");

        Ok(Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn to_request(&self, prompt: &str, stop: Option<&[String]>) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
                top_p: self.top_p,
                num_predict: self.max_tokens,
                stop: stop.filter(|s| !s.is_empty()).map(<[String]>::to_vec),
            },
        }
    }
}

#[async_trait]
impl PluginAdapter for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, MemsearchError> {
        match self.client.tags().await {
            Ok(tags) if tags.models.iter().any(|m| m.name == self.model) => {
                Ok(HealthStatus::Healthy)
            }
            Ok(_) => Ok(HealthStatus::Degraded(format!(
                "model {} is not pulled",
                self.model
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl ProviderAdapter for OllamaProvider {
    async fn generate(
        &self,
        prompt: &str,
        stop: Option<&[String]>,
    ) -> Result<String, MemsearchError> {
        let request = self.to_request(prompt, stop);
        debug!(model = %self.model, prompt_len = prompt.len(), "generating");

        match self.client.generate(&request).await {
            Ok(response) => Ok(response.response),
            Err(e) => {
                error!(error = %e, "error generating text with Ollama");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(uri: &str) -> OllamaProvider {
        OllamaProvider::with_base_url(&LlmConfig::default(), uri).unwrap()
    }

    #[tokio::test]
    async fn generate_forwards_sampling_options_and_stop() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(serde_json::json!({
                "model": "gemma:3b",
                "options": {
                    "temperature": 0.7,
                    "top_p": 0.9,
                    "num_predict": 2048,
                    "stop": ["\nHuman:"]
                }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"response": "NO_SEARCH", "done": true})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let stop = vec!["\nHuman:".to_string()];
        let out = provider(&server.uri())
            .generate("Should I search?", Some(&stop))
            .await
            .unwrap();
        assert_eq!(out, "NO_SEARCH");
    }

    #[test]
    fn empty_stop_list_is_omitted() {
        let p = OllamaProvider::with_base_url(&LlmConfig::default(), "http://localhost:1").unwrap();
        let req = p.to_request("x", Some(&[]));
        assert!(req.options.stop.is_none());
    }

    #[tokio::test]
    async fn health_check_reports_missing_model_as_degraded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"models": [{"name": "llama3:8b"}]})),
            )
            .mount(&server)
            .await;

        let status = provider(&server.uri()).health_check().await.unwrap();
        assert!(matches!(status, HealthStatus::Degraded(_)), "got: {status:?}");
    }

    #[tokio::test]
    async fn health_check_healthy_when_model_present() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"models": [{"name": "gemma:3b"}]})),
            )
            .mount(&server)
            .await;

        let status = provider(&server.uri()).health_check().await.unwrap();
        assert_eq!(status, HealthStatus::Healthy);
    }

    #[test]
    fn plugin_adapter_metadata() {
        let p = OllamaProvider::new(&LlmConfig::default()).unwrap();
        assert_eq!(p.name(), "ollama");
        assert_eq!(p.version(), semver::Version::new(0, 1, 0));
        assert_eq!(p.adapter_type(), AdapterType::Provider);
        assert_eq!(p.model(), "gemma:3b");
    }
}
