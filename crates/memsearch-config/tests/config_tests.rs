// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the memsearch configuration system.

use memsearch_config::diagnostic::ConfigError;
use memsearch_config::model::{MemsearchConfig, SimilarityMetric};
use memsearch_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// A file setting every section deserializes field by field.
#[test]
fn full_toml_deserializes_into_config() {
    let toml = r#"
[agent]
name = "librarian"
log_level = "debug"
log_file = "/tmp/memsearch.log"
system_prompt = "Be brief."

[llm]
model = "llama3:8b"
host = "gpu-box"
port = 11500
temperature = 0.2
top_p = 0.95
max_tokens = 512
timeout_secs = 60

[memory]
host = "mem"
port = 6000
collection_name = "notes"
top_k = 3
similarity_threshold = 0.6
similarity_metric = "dot"
timeout_secs = 45

[search]
host = "perplexica"
port = 3001
max_results = 8
search_threshold = 0.4
timeout_secs = 5
memory_gate = true

[api]
host = "0.0.0.0"
port = 8080
token = "s3cret"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "librarian");
    assert_eq!(config.agent.log_file.as_deref(), Some("/tmp/memsearch.log"));
    assert_eq!(config.agent.system_prompt.as_deref(), Some("Be brief."));
    assert_eq!(config.llm.model, "llama3:8b");
    assert_eq!(config.llm.base_url(), "http://gpu-box:11500");
    assert_eq!(config.llm.max_tokens, 512);
    assert_eq!(config.llm.timeout_secs, 60);
    assert_eq!(config.memory.collection_name, "notes");
    assert_eq!(config.memory.top_k, 3);
    assert_eq!(config.memory.similarity_metric, SimilarityMetric::Dot);
    assert_eq!(config.memory.timeout_secs, 45);
    assert_eq!(config.search.max_results, 8);
    assert_eq!(config.search.timeout_secs, 5);
    assert!(config.search.memory_gate);
    assert_eq!(config.api.port, 8080);
    assert_eq!(config.api.token.as_deref(), Some("s3cret"));
}

/// An empty file yields the local-deployment defaults.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.agent.name, "memsearch");
    assert_eq!(config.agent.log_level, "info");
    assert!(config.agent.log_file.is_none());
    assert_eq!(config.llm.model, "gemma:3b");
    assert_eq!(config.llm.port, 11434);
    assert_eq!(config.llm.temperature, 0.7);
    assert_eq!(config.llm.top_p, 0.9);
    assert_eq!(config.llm.max_tokens, 2048);
    assert_eq!(config.memory.port, 5000);
    assert_eq!(config.memory.top_k, 5);
    assert_eq!(config.memory.similarity_threshold, 0.7);
    assert_eq!(config.memory.similarity_metric, SimilarityMetric::Cosine);
    assert_eq!(config.memory.timeout_secs, 30);
    assert_eq!(config.search.port, 5001);
    assert_eq!(config.search.max_results, 5);
    assert_eq!(config.search.search_threshold, 0.5);
    assert_eq!(config.search.timeout_secs, 10);
    assert!(!config.search.memory_gate);
    assert_eq!(config.api.port, 5002);
    assert!(config.api.token.is_none());
}

/// Unknown field in [llm] is rejected.
#[test]
fn unknown_field_in_llm_produces_error() {
    let toml = r#"
[llm]
modle = "gemma:3b"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("modle"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[telegram]
bot_token = "x"
"#;

    let err = load_config_from_str(toml).expect_err("unknown section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("telegram"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Dotted overrides (what the env provider produces) win over the file.
#[test]
fn dotted_override_beats_toml() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: MemsearchConfig = Figment::new()
        .merge(Serialized::defaults(MemsearchConfig::default()))
        .merge(Toml::string("[search]\nmax_results = 3\n"))
        .merge(("search.max_results", 9))
        .merge(("search.memory_gate", true))
        .extract()
        .expect("should merge override");

    assert_eq!(config.search.max_results, 9);
    assert!(config.search.memory_gate);
}

/// Missing config files are silently skipped.
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: MemsearchConfig = Figment::new()
        .merge(Serialized::defaults(MemsearchConfig::default()))
        .merge(Toml::file("/nonexistent/path/memsearch.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.agent.name, "memsearch");
}

/// Unknown key in [memory] becomes an UnknownKey diagnostic with a suggestion.
#[test]
fn diagnostic_suggests_closest_key() {
    let toml = r#"
[memory]
colection_name = "notes"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "colection_name"
                && suggestion.as_deref() == Some("collection_name")
                && valid_keys.contains("similarity_threshold")
        })
    });
    assert!(found, "expected UnknownKey with suggestion, got: {errors:?}");
}

/// Unknown key diagnostics for inline sources carry a span on the key.
#[test]
fn diagnostic_points_at_inline_key() {
    let toml = "[search]\nmax_reslts = 3\n";

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let span = errors.iter().find_map(|e| match e {
        ConfigError::UnknownKey { span, .. } => *span,
        _ => None,
    });
    if let Some(span) = span {
        assert_eq!(&toml[span.offset()..span.offset() + span.len()], "max_reslts");
    }
}

/// String where a number is expected produces a type error.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[llm]
port = "eleven"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. }) || e.to_string().contains("port")),
        "got: {errors:?}"
    );
}

/// ConfigError renders with miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "modle".to_string(),
        suggestion: Some("model".to_string()),
        valid_keys: "model, host, port".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some());
    let help = error.help().expect("help text").to_string();
    assert!(help.contains("did you mean `model`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("modle"));
}

/// Validation errors surface through load_and_validate_str.
#[test]
fn validation_catches_zero_max_results() {
    let toml = r#"
[search]
max_results = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("zero max_results should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("search.max_results"))
    ));
}

/// An explicit file path is loaded and validated.
#[test]
fn load_and_validate_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memsearch.toml");
    std::fs::write(&path, "[memory]\ntop_k = 2\n").unwrap();

    let config = load_and_validate_path(&path).expect("file should load");
    assert_eq!(config.memory.top_k, 2);
}

/// Defaults validate without any config file present.
#[test]
fn load_and_validate_defaults() {
    let config = memsearch_config::load_and_validate().expect("defaults should validate");
    assert!(!config.llm.model.is_empty());
}
