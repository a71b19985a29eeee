// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all port adapters implement.

use async_trait::async_trait;

use crate::error::MemsearchError;
use crate::types::{AdapterType, HealthStatus};

/// The base trait for all memsearch port adapters.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns which port this adapter implements.
    fn adapter_type(&self) -> AdapterType;

    /// Probes the backing service and reports its current status.
    async fn health_check(&self) -> Result<HealthStatus, MemsearchError>;
}
