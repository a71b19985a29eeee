// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `memsearch serve` command implementation.

use std::sync::Arc;

use memsearch_config::MemsearchConfig;
use memsearch_core::MemsearchError;
use memsearch_gateway::{AppState, start_server};
use tracing::info;

/// Build the orchestrator once and serve it over HTTP until stopped.
pub async fn run_serve(config: MemsearchConfig) -> Result<(), MemsearchError> {
    let orchestrator = Arc::new(crate::build_orchestrator(&config).await?);
    info!(
        agent = %orchestrator.name(),
        "serving API on {}:{}",
        config.api.host,
        config.api.port
    );

    let state = AppState::new(orchestrator, &config.api);

    tokio::select! {
        result = start_server(&config.api, state) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown requested");
            Ok(())
        }
    }
}
