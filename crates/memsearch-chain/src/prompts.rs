// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt templates and the plain-text chat rendering they share.
//!
//! Every model call receives a single string laid out as role-prefixed
//! lines (`System:`, `Human:`, `AI:`), one message per block.

use memsearch_config::AgentConfig;
use memsearch_core::{ChatTurn, Role};
use tracing::{info, warn};

/// Retrieval produced nothing usable.
pub const NO_MEMORY: &str = "No relevant memory found.";

/// The search stage did not consult the web.
pub const NO_SEARCH_PERFORMED: &str = "No web search performed.";

/// Decision reply prefix requesting a search; the remainder is the query.
pub const SEARCH_PREFIX: &str = "SEARCH:";

/// Decision reply declining a search.
pub const NO_SEARCH: &str = "NO_SEARCH";

const DECISION_INSTRUCTIONS: &str = "You are an AI assistant that determines if a web search is needed to answer a question.
If the question requires real-time information, current events, specific facts that might not be in your training data,
or if you're unsure about the answer, respond with 'SEARCH: <search query>'.
Otherwise, respond with 'NO_SEARCH'.";

const SUMMARY_INSTRUCTIONS: &str = "You are an AI assistant that summarizes search results.
Create a concise, informative summary of the search results provided.
Focus on extracting the key information relevant to the original query.
Include important facts, figures, and context.
Cite sources where appropriate.";

const SOURCES_INSTRUCTIONS: &str = "You have access to the following information:
1. Memory: Previous conversations and information you've stored
2. Search Results: Information retrieved from the web (if applicable)

Use this information to provide a comprehensive, accurate response.
Always cite sources when using information from search results.";

/// Built-in preamble used when no system prompt is configured.
pub fn default_system_prompt(agent_name: &str) -> String {
    format!(
        "You are {agent_name}, a helpful AI assistant with memory and web search capabilities.
You have access to your conversation history and can search the web when needed.
Always provide accurate, helpful, and concise responses based on the available information.

When you don't know something or need more information, you can use your search tool.
After searching, always cite your sources.

Your memory contains previous conversations and search results that you can reference."
    )
}

/// Resolve the system prompt: `system_prompt_file` > `system_prompt` > default.
///
/// An unreadable or empty file falls through to the next source.
pub async fn resolve_system_prompt(agent: &AgentConfig) -> String {
    if let Some(path) = &agent.system_prompt_file {
        match tokio::fs::read_to_string(path).await {
            Ok(content) if !content.trim().is_empty() => {
                info!(path = %path, "loaded system prompt from file");
                return content.trim().to_string();
            }
            Ok(_) => warn!(path = %path, "system prompt file is empty, falling back"),
            Err(e) => warn!(path = %path, error = %e, "failed to read system prompt file, falling back"),
        }
    }

    if let Some(prompt) = &agent.system_prompt
        && !prompt.trim().is_empty()
    {
        return prompt.clone();
    }

    default_system_prompt(&agent.name)
}

/// A rendered chat transcript, built message by message.
#[derive(Debug, Default)]
pub(crate) struct Transcript {
    blocks: Vec<String>,
}

impl Transcript {
    pub(crate) fn system(mut self, text: &str) -> Self {
        self.blocks.push(format!("System: {text}"));
        self
    }

    pub(crate) fn human(mut self, text: &str) -> Self {
        self.blocks.push(format!("Human: {text}"));
        self
    }

    pub(crate) fn history(mut self, turns: &[ChatTurn]) -> Self {
        for turn in turns {
            let speaker = match turn.role {
                Role::User => "Human",
                Role::Assistant => "AI",
            };
            self.blocks.push(format!("{speaker}: {}", turn.content));
        }
        self
    }

    pub(crate) fn render(self) -> String {
        self.blocks.join("\n")
    }
}

/// Prompt asking whether `question` needs a web search.
pub fn decision_prompt(question: &str) -> String {
    Transcript::default()
        .system(DECISION_INSTRUCTIONS)
        .human(question)
        .render()
}

/// Prompt asking for a summary of formatted search results.
pub fn summary_prompt(question: &str, search_results: &str) -> String {
    let request = format!(
        "Original query: {question}\n\nSearch results:\n{search_results}\n\nPlease summarize these results."
    );
    Transcript::default()
        .system(SUMMARY_INSTRUCTIONS)
        .human(&request)
        .render()
}

pub(crate) fn sources_instructions() -> &'static str {
    SOURCES_INSTRUCTIONS
}
