// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language model port.

use async_trait::async_trait;

use crate::error::MemsearchError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for a text-completion language model runtime.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Generates a completion for a fully rendered prompt.
    ///
    /// Generation halts at the first occurrence of any `stop` sequence.
    /// Failures are reported as [`MemsearchError::Model`].
    async fn generate(&self, prompt: &str, stop: Option<&[String]>)
    -> Result<String, MemsearchError>;
}
