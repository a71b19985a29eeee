// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Port trait definitions.
//!
//! Every adapter extends the [`PluginAdapter`] base trait and uses
//! `#[async_trait]` so the chain can hold ports as `Arc<dyn ...>`.

pub mod adapter;
pub mod memory;
pub mod provider;
pub mod search;

pub use adapter::PluginAdapter;
pub use memory::MemoryAdapter;
pub use provider::ProviderAdapter;
pub use search::SearchAdapter;
