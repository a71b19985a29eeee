// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! memsearch - a conversational agent with long-term memory and web search.
//!
//! This is the binary entry point.

mod serve;
mod shell;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use memsearch_chain::{ChainSettings, Orchestrator, resolve_system_prompt};
use memsearch_config::{AgentConfig, MemsearchConfig};
use memsearch_core::MemsearchError;
use memsearch_memory::OpenMemoryStore;
use memsearch_ollama::OllamaProvider;
use memsearch_search::PerplexicaSearch;

/// memsearch - a conversational agent with long-term memory and web search.
#[derive(Parser, Debug)]
#[command(name = "memsearch", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Chat in the terminal (default).
    Shell(ShellArgs),
    /// Serve the HTTP API.
    Serve,
    /// Print the effective configuration as TOML.
    Config,
}

/// Per-session retrieval overrides for `memsearch shell`.
#[derive(Args, Debug, Default, PartialEq)]
struct ShellArgs {
    /// Number of memory records to retrieve.
    #[arg(short = 'k', long)]
    memory_top_k: Option<usize>,

    /// Minimum similarity for retrieved memory.
    #[arg(short = 't', long)]
    memory_threshold: Option<f32>,

    /// Memory score above which web search is skipped (with the memory gate).
    #[arg(short = 's', long)]
    search_threshold: Option<f32>,
}

impl ShellArgs {
    fn apply(&self, config: &mut MemsearchConfig) {
        if let Some(top_k) = self.memory_top_k {
            config.memory.top_k = top_k;
        }
        if let Some(threshold) = self.memory_threshold {
            config.memory.similarity_threshold = threshold;
        }
        if let Some(threshold) = self.search_threshold {
            config.search.search_threshold = threshold;
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Shell(ShellArgs::default()));

    let loaded = match &cli.config {
        Some(path) => memsearch_config::load_and_validate_path(path),
        None => memsearch_config::load_and_validate(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            memsearch_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    if let Commands::Shell(args) = &command {
        args.apply(&mut config);
        if let Err(errors) = memsearch_config::validation::validate_config(&config) {
            memsearch_config::render_errors(&errors);
            std::process::exit(1);
        }
    }

    if let Err(e) = init_tracing(&config.agent) {
        eprintln!("memsearch: {e}");
        std::process::exit(1);
    }

    let result = match command {
        Commands::Shell(_) => shell::run_shell(config).await,
        Commands::Serve => serve::run_serve(config).await,
        Commands::Config => print_config(&config),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "memsearch exited with an error");
        eprintln!("memsearch: {e}");
        std::process::exit(1);
    }
}

fn print_config(config: &MemsearchConfig) -> Result<(), MemsearchError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| MemsearchError::Internal(format!("failed to render configuration: {e}")))?;
    print!("{rendered}");
    Ok(())
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins over `agent.log_level`. When `agent.log_file` is set,
/// a plain-text copy of every event is appended to it.
fn init_tracing(agent: &AgentConfig) -> Result<(), MemsearchError> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "memsearch={},warn",
            agent.log_level.to_ascii_lowercase()
        ))
    });

    let file_layer = match &agent.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| MemsearchError::Config(format!("cannot open log file {path}: {e}")))?;
            Some(
                fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_names(false),
        )
        .with(file_layer)
        .init();

    Ok(())
}

/// Connect every port and wire the orchestrator.
///
/// Fails when the memory collection cannot be reached or created.
async fn build_orchestrator(config: &MemsearchConfig) -> Result<Orchestrator, MemsearchError> {
    let provider = Arc::new(OllamaProvider::new(&config.llm)?);
    let memory = Arc::new(OpenMemoryStore::connect(&config.memory).await?);
    let search = Arc::new(PerplexicaSearch::new(&config.search)?);
    let system_prompt = resolve_system_prompt(&config.agent).await;

    tracing::info!(
        model = %config.llm.model,
        collection = %config.memory.collection_name,
        memory_gate = config.search.memory_gate,
        "orchestrator ready"
    );

    Ok(Orchestrator::new(
        provider,
        memory,
        search,
        ChainSettings::from_config(config),
    )
    .with_name(config.agent.name.clone())
    .with_system_prompt(system_prompt))
}
