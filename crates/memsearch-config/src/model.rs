// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Top-level memsearch configuration.
///
/// Every section is optional and falls back to the defaults of a local
/// Ollama / OpenMemory / Perplexica deployment.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemsearchConfig {
    /// Identity, logging and system prompt.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Language model runtime (Ollama).
    #[serde(default)]
    pub llm: LlmConfig,

    /// Memory store (OpenMemory) and retrieval parameters.
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Web search backend (Perplexica) and search gating.
    #[serde(default)]
    pub search: SearchConfig,

    /// HTTP API server.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Agent identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name, used in the console banner and the default preamble.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional file that receives a plain-text copy of the log.
    #[serde(default)]
    pub log_file: Option<String>,

    /// Inline system prompt string. Overridden by `system_prompt_file` if both set.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Path to a file containing the system prompt.
    #[serde(default)]
    pub system_prompt_file: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            log_file: None,
            system_prompt: None,
            system_prompt_file: None,
        }
    }
}

fn default_agent_name() -> String {
    "memsearch".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

/// Ollama runtime configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// Model tag served by the runtime.
    #[serde(default = "default_llm_model")]
    pub model: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_llm_port")]
    pub port: u16,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling cutoff.
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Maximum number of tokens to generate per call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_llm_model(),
            host: default_host(),
            port: default_llm_port(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

impl LlmConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn default_llm_model() -> String {
    "gemma:3b".to_string()
}

fn default_llm_port() -> u16 {
    11434
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.9
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_llm_timeout_secs() -> u64 {
    300
}

/// Similarity metric the memory store ranks with.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SimilarityMetric {
    #[default]
    Cosine,
    Dot,
    Euclidean,
}

/// OpenMemory store and retrieval configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_memory_port")]
    pub port: u16,

    /// Collection that holds every record written by memsearch.
    #[serde(default = "default_collection_name")]
    pub collection_name: String,

    /// Maximum records retrieved per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Minimum similarity score, passed verbatim to the store.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    #[serde(default)]
    pub similarity_metric: SimilarityMetric,

    /// Per-request timeout in seconds.
    #[serde(default = "default_memory_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_memory_port(),
            collection_name: default_collection_name(),
            top_k: default_top_k(),
            similarity_threshold: default_similarity_threshold(),
            similarity_metric: SimilarityMetric::default(),
            timeout_secs: default_memory_timeout_secs(),
        }
    }
}

impl MemoryConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn default_memory_port() -> u16 {
    5000
}

fn default_collection_name() -> String {
    "memsearch".to_string()
}

fn default_top_k() -> usize {
    5
}

fn default_similarity_threshold() -> f32 {
    0.7
}

fn default_memory_timeout_secs() -> u64 {
    30
}

/// Perplexica search configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_search_port")]
    pub port: u16,

    /// Maximum hits requested per search.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Best memory score at which the memory gate skips web search.
    #[serde(default = "default_search_threshold")]
    pub search_threshold: f32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_search_timeout_secs")]
    pub timeout_secs: u64,

    /// Run retrieval first and skip web search when memory already scores
    /// at least `search_threshold`. Off: retrieval and search run concurrently.
    #[serde(default)]
    pub memory_gate: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_search_port(),
            max_results: default_max_results(),
            search_threshold: default_search_threshold(),
            timeout_secs: default_search_timeout_secs(),
            memory_gate: false,
        }
    }
}

impl SearchConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn default_search_port() -> u16 {
    5001
}

fn default_max_results() -> usize {
    5
}

fn default_search_threshold() -> f32 {
    0.5
}

fn default_search_timeout_secs() -> u64 {
    10
}

/// HTTP API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_api_port")]
    pub port: u16,

    /// Bearer token required on every route but `/health`. `None` leaves the API open.
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_api_port(),
            token: None,
        }
    }
}

fn default_api_port() -> u16 {
    5002
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_urls_use_host_and_port() {
        let config = MemsearchConfig::default();
        assert_eq!(config.llm.base_url(), "http://localhost:11434");
        assert_eq!(config.memory.base_url(), "http://localhost:5000");
        assert_eq!(config.search.base_url(), "http://localhost:5001");
    }

    #[test]
    fn similarity_metric_parses_lowercase() {
        let config: MemsearchConfig = toml::from_str(
            r#"
[memory]
similarity_metric = "euclidean"
"#,
        )
        .unwrap();
        assert_eq!(config.memory.similarity_metric, SimilarityMetric::Euclidean);
        assert_eq!(SimilarityMetric::Dot.to_string(), "dot");
    }

    #[test]
    fn unknown_metric_is_rejected() {
        let result = toml::from_str::<MemsearchConfig>(
            r#"
[memory]
similarity_metric = "manhattan"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let rendered = toml::to_string(&MemsearchConfig::default()).unwrap();
        let parsed: MemsearchConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.llm.model, "gemma:3b");
        assert_eq!(parsed.search.timeout_secs, 10);
        assert_eq!(parsed.memory.timeout_secs, 30);
        assert!(parsed.api.token.is_none());
    }
}
