// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The memsearch orchestration chain.
//!
//! For each query the [`Orchestrator`]:
//! - retrieves related records from memory ([`retrieval`]),
//! - asks the model whether to search the web, and if so searches and
//!   summarizes ([`decision`], [`web`]),
//! - composes one prompt from both plus the chat history ([`compose`]),
//! - calls the model and records the exchange ([`persistence`]).
//!
//! Only the final model call can fail a turn; every other failure degrades
//! to sentinel text reported through [`StageStatus`].

pub mod chain;
pub mod compose;
pub mod decision;
pub mod history;
pub mod persistence;
pub mod prompts;
pub mod retrieval;
pub mod stage;
pub mod web;

pub use chain::{Answer, ChainSettings, Orchestrator};
pub use decision::{SearchDecision, parse_decision};
pub use history::ChatHistory;
pub use prompts::{NO_MEMORY, NO_SEARCH, NO_SEARCH_PERFORMED, resolve_system_prompt};
pub use stage::{StageContext, StageStatus};
