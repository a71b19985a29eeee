// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the memsearch orchestrator.

use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// The error type shared by every port, stage, and surface of memsearch.
#[derive(Debug, Error)]
pub enum MemsearchError {
    /// Configuration errors (invalid TOML, unreadable prompt file, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Language model runtime errors (unreachable, non-success status, bad body).
    #[error("model error: {message}")]
    Model {
        message: String,
        source: Option<BoxedSource>,
    },

    /// Memory store errors (collection setup, write or search failure).
    #[error("memory error: {message}")]
    Memory {
        message: String,
        source: Option<BoxedSource>,
    },

    /// Web search backend errors, timeouts included.
    #[error("search error: {message}")]
    Search {
        message: String,
        source: Option<BoxedSource>,
    },

    /// Malformed input at the API surface.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MemsearchError {
    /// Model error without an underlying cause.
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model {
            message: message.into(),
            source: None,
        }
    }

    /// Memory error without an underlying cause.
    pub fn memory(message: impl Into<String>) -> Self {
        Self::Memory {
            message: message.into(),
            source: None,
        }
    }

    /// Search error without an underlying cause.
    pub fn search(message: impl Into<String>) -> Self {
        Self::Search {
            message: message.into(),
            source: None,
        }
    }
}
