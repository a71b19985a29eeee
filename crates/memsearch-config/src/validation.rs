// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks ranges and non-empty values that serde cannot express. All
//! problems are collected before returning.

use crate::diagnostic::ConfigError;
use crate::model::MemsearchConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &MemsearchConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ConfigError::validation(format!(
            "agent.log_level `{}` must be one of {}",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    for (section, host, port) in [
        ("llm", &config.llm.host, config.llm.port),
        ("memory", &config.memory.host, config.memory.port),
        ("search", &config.search.host, config.search.port),
        ("api", &config.api.host, config.api.port),
    ] {
        if host.trim().is_empty() {
            errors.push(ConfigError::validation(format!(
                "{section}.host must not be empty"
            )));
        }
        if port == 0 {
            errors.push(ConfigError::validation(format!(
                "{section}.port must be between 1 and 65535"
            )));
        }
    }

    if config.llm.model.trim().is_empty() {
        errors.push(ConfigError::validation("llm.model must not be empty"));
    }

    let temperature = config.llm.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        errors.push(ConfigError::validation(format!(
            "llm.temperature must be within 0.0..=2.0, got {temperature}"
        )));
    }

    let top_p = config.llm.top_p;
    if !(top_p > 0.0 && top_p <= 1.0) {
        errors.push(ConfigError::validation(format!(
            "llm.top_p must be within (0.0, 1.0], got {top_p}"
        )));
    }

    if config.llm.max_tokens == 0 {
        errors.push(ConfigError::validation("llm.max_tokens must be at least 1"));
    }

    if config.memory.collection_name.trim().is_empty() {
        errors.push(ConfigError::validation(
            "memory.collection_name must not be empty",
        ));
    }

    if config.memory.top_k == 0 {
        errors.push(ConfigError::validation("memory.top_k must be at least 1"));
    }

    if !config.memory.similarity_threshold.is_finite() {
        errors.push(ConfigError::validation(
            "memory.similarity_threshold must be a finite number",
        ));
    }

    if config.search.max_results == 0 {
        errors.push(ConfigError::validation(
            "search.max_results must be at least 1",
        ));
    }

    let threshold = config.search.search_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        errors.push(ConfigError::validation(format!(
            "search.search_threshold must be within 0.0..=1.0, got {threshold}"
        )));
    }

    for (key, secs) in [
        ("llm.timeout_secs", config.llm.timeout_secs),
        ("memory.timeout_secs", config.memory.timeout_secs),
        ("search.timeout_secs", config.search.timeout_secs),
    ] {
        if secs == 0 {
            errors.push(ConfigError::validation(format!("{key} must be at least 1")));
        }
    }

    if let Some(token) = &config.api.token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::validation(
            "api.token must not be empty when set",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &MemsearchConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&MemsearchConfig::default()).is_ok());
    }

    #[test]
    fn zero_top_k_fails_validation() {
        let mut config = MemsearchConfig::default();
        config.memory.top_k = 0;
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("memory.top_k")));
    }

    #[test]
    fn out_of_range_search_threshold_fails_validation() {
        let mut config = MemsearchConfig::default();
        config.search.search_threshold = 1.5;
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("search.search_threshold")));
    }

    #[test]
    fn all_problems_are_collected() {
        let mut config = MemsearchConfig::default();
        config.llm.host = " ".into();
        config.api.port = 0;
        config.agent.log_level = "loud".into();
        config.search.timeout_secs = 0;
        let msgs = messages(&config);
        assert_eq!(msgs.len(), 4, "got: {msgs:?}");
    }

    #[test]
    fn zero_memory_timeout_fails_validation() {
        let mut config = MemsearchConfig::default();
        config.memory.timeout_secs = 0;
        let msgs = messages(&config);
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("memory.timeout_secs must be at least 1"));
    }

    #[test]
    fn nan_similarity_threshold_fails_validation() {
        let mut config = MemsearchConfig::default();
        config.memory.similarity_threshold = f32::NAN;
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("similarity_threshold")));
    }

    #[test]
    fn blank_token_fails_validation() {
        let mut config = MemsearchConfig::default();
        config.api.token = Some(String::new());
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("api.token")));
    }

    #[test]
    fn uppercase_log_level_is_accepted() {
        let mut config = MemsearchConfig::default();
        config.agent.log_level = "DEBUG".into();
        assert!(validate_config(&config).is_ok());
    }
}
