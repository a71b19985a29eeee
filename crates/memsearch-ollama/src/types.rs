// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Ollama `/api/generate` endpoint.

use serde::{Deserialize, Serialize};

/// Non-streaming generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub options: GenerateOptions,
}

/// Sampling options forwarded to the runtime.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOptions {
    pub temperature: f32,
    pub top_p: f32,
    /// Maximum number of tokens to generate.
    pub num_predict: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

/// Completed generation. Only the fields memsearch reads are declared.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub eval_count: Option<u64>,
}

/// Body Ollama returns alongside non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

/// `/api/tags` listing, used by the health check.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelTag {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_absent_stop() {
        let req = GenerateRequest {
            model: "gemma:3b".into(),
            prompt: "hi".into(),
            stream: false,
            options: GenerateOptions {
                temperature: 0.7,
                top_p: 0.9,
                num_predict: 2048,
                stop: None,
            },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 2048);
        assert!(json["options"].get("stop").is_none());
    }

    #[test]
    fn response_tolerates_extra_fields() {
        let resp: GenerateResponse = serde_json::from_str(
            r#"{"model":"gemma:3b","created_at":"2026-01-01T00:00:00Z","response":"ok","done":true,"context":[1,2]}"#,
        )
        .unwrap();
        assert_eq!(resp.response, "ok");
        assert!(resp.done);
        assert_eq!(resp.eval_count, None);
    }
}
