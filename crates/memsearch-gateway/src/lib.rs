// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API for the memsearch orchestrator.
//!
//! Exposes chat, memory listing, direct web search and session reset over
//! JSON, plus an unauthenticated health check. One orchestrator is shared
//! by every request, so all clients see the same chat history.

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::AuthConfig;
pub use server::{AppState, router, start_server};
