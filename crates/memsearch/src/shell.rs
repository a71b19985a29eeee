// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `memsearch shell` command implementation.
//!
//! An interactive REPL with colored output, readline history and a spinner
//! while the chain is working. One orchestrator, and therefore one chat
//! history, lives for the whole session.

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use memsearch_config::MemsearchConfig;
use memsearch_core::MemsearchError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

const EXIT_WORDS: &[&str] = &["exit", "quit", "q", "bye"];
const RESET_WORDS: &[&str] = &["reset", "clear"];

/// What one line of input asks the shell to do.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Exit,
    Reset,
    Skip,
    Ask(&'a str),
}

fn classify(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    let lowered = trimmed.to_lowercase();
    if trimmed.is_empty() {
        Input::Skip
    } else if EXIT_WORDS.contains(&lowered.as_str()) {
        Input::Exit
    } else if RESET_WORDS.contains(&lowered.as_str()) {
        Input::Reset
    } else {
        Input::Ask(trimmed)
    }
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Runs the `memsearch shell` interactive REPL.
pub async fn run_shell(config: MemsearchConfig) -> Result<(), MemsearchError> {
    let orchestrator = crate::build_orchestrator(&config).await?;

    let mut rl = DefaultEditor::new()
        .map_err(|e| MemsearchError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", format!("{} shell", orchestrator.name()).bold().green());
    println!(
        "Type {} to leave, {} to forget this conversation.\n",
        "exit".yellow(),
        "reset".yellow()
    );

    let prompt = format!("{} ", "You:".blue().bold());
    let speaker = format!("{}:", orchestrator.name()).green().bold();
    loop {
        match rl.readline(&prompt) {
            Ok(line) => match classify(&line) {
                Input::Skip => continue,
                Input::Exit => break,
                Input::Reset => {
                    orchestrator.reset().await;
                    println!("{}", "Chat history reset.".dimmed());
                }
                Input::Ask(question) => {
                    let _ = rl.add_history_entry(question);
                    let spinner = thinking_spinner();
                    let answer = orchestrator.invoke(question).await;
                    spinner.finish_and_clear();

                    if answer.starts_with("Error:") {
                        eprintln!("{}", answer.red());
                    } else {
                        println!("{speaker} {answer}\n");
                    }
                }
            },
            // Ctrl+C / Ctrl+D
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}
