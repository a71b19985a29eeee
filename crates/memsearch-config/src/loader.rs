// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order: `./memsearch.toml` > `~/.config/memsearch/memsearch.toml` >
//! `/etc/memsearch/memsearch.toml`, with `MEMSEARCH_*` environment variables
//! overriding all files.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::MemsearchConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG: &str = "/etc/memsearch/memsearch.toml";

/// Configuration file in the working directory.
pub const LOCAL_CONFIG: &str = "memsearch.toml";

/// Top-level sections an environment variable may address.
const SECTIONS: &[&str] = &["agent", "llm", "memory", "search", "api"];

/// `~/.config/memsearch/memsearch.toml`, when a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("memsearch").join("memsearch.toml"))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/memsearch/memsearch.toml`
/// 3. `~/.config/memsearch/memsearch.toml`
/// 4. `./memsearch.toml`
/// 5. `MEMSEARCH_*` environment variables
pub fn load_config() -> Result<MemsearchConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string over the compiled defaults only.
pub fn load_config_from_str(toml_content: &str) -> Result<MemsearchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MemsearchConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MemsearchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MemsearchConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The figment behind [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(MemsearchConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Environment provider mapping `MEMSEARCH_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `MEMSEARCH_SEARCH_MEMORY_GATE` maps to `search.memory_gate`.
fn env_provider() -> Env {
    Env::prefixed("MEMSEARCH_").map(|key| env_key_to_path(key.as_str()).into())
}

/// Map a prefix-stripped env var name to a lowercase config path.
pub fn env_key_to_path(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    match key.split_once('_') {
        Some((section, rest)) if SECTIONS.contains(&section) && !rest.is_empty() => {
            format!("{section}.{rest}")
        }
        _ => key,
    }
}
