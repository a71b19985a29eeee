// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composition stage: one prompt from every context source.

use memsearch_core::ChatTurn;

use crate::prompts::{Transcript, sources_instructions};

/// Everything the final prompt is built from. Never persisted.
#[derive(Debug, Clone)]
pub struct PromptContext<'a> {
    pub question: &'a str,
    pub chat_history: &'a [ChatTurn],
    pub memory_content: &'a str,
    pub search_content: &'a str,
}

/// Assemble the final prompt in fixed order: system preamble, source
/// instructions, memory, search results, the full history, the new turn.
///
/// Nothing is truncated.
pub fn compose(system_prompt: &str, ctx: &PromptContext<'_>) -> String {
    Transcript::default()
        .system(system_prompt)
        .system(sources_instructions())
        .system(&format!("Memory:\n{}", ctx.memory_content))
        .system(&format!("Search Results:\n{}", ctx.search_content))
        .history(ctx.chat_history)
        .human(ctx.question)
        .render()
}
