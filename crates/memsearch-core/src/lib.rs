// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the memsearch orchestrator.
//!
//! This crate defines the three ports the orchestration chain talks to
//! (language model, memory store, web search), the error type shared by
//! every crate in the workspace, and the plain data types that cross the
//! port boundaries.

pub mod error;
pub mod traits;
pub mod types;

pub use error::MemsearchError;
pub use types::{
    AdapterType, ChatTurn, HealthStatus, MemoryRecord, Metadata, Role, SearchResult, SourceType,
};

pub use traits::{MemoryAdapter, PluginAdapter, ProviderAdapter, SearchAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_render_their_kind() {
        let config = MemsearchError::Config("bad port".into());
        assert_eq!(config.to_string(), "configuration error: bad port");

        let model = MemsearchError::model("connection refused");
        assert_eq!(model.to_string(), "model error: connection refused");

        let memory = MemsearchError::memory("collection missing");
        assert_eq!(memory.to_string(), "memory error: collection missing");

        let search = MemsearchError::search("timed out after 10s");
        assert_eq!(search.to_string(), "search error: timed out after 10s");

        let validation = MemsearchError::Validation("Missing 'query' field".into());
        assert_eq!(validation.to_string(), "validation error: Missing 'query' field");

        let internal = MemsearchError::Internal("poisoned".into());
        assert_eq!(internal.to_string(), "internal error: poisoned");
    }

    #[test]
    fn error_keeps_source() {
        use std::error::Error;

        let err = MemsearchError::Search {
            message: "transport".into(),
            source: Some(Box::new(std::io::Error::other("reset by peer"))),
        };
        let source = err.source().expect("source should be kept");
        assert_eq!(source.to_string(), "reset by peer");
    }

    #[test]
    fn adapter_type_round_trips_through_strings() {
        use std::str::FromStr;

        for variant in [AdapterType::Provider, AdapterType::Memory, AdapterType::Search] {
            let s = variant.to_string();
            let parsed = AdapterType::from_str(&s).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn health_status_variants() {
        let healthy = HealthStatus::Healthy;
        let degraded = HealthStatus::Degraded("slow".into());
        let unhealthy = HealthStatus::Unhealthy("down".into());

        assert_eq!(healthy, HealthStatus::Healthy);
        assert_ne!(degraded, healthy);
        assert_ne!(unhealthy, healthy);
        assert_eq!(unhealthy.to_string(), "unhealthy: down");
    }

    #[test]
    fn all_port_traits_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_provider_adapter<T: ProviderAdapter>() {}
        fn _assert_memory_adapter<T: MemoryAdapter>() {}
        fn _assert_search_adapter<T: SearchAdapter>() {}
    }
}
