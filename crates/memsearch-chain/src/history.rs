// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rolling chat history of one orchestrator session.

use memsearch_core::ChatTurn;

/// Append-only sequence of turns, cleared only by [`ChatHistory::clear`].
///
/// Turns are always appended in user/assistant pairs.
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed exchange.
    pub fn push_exchange(&mut self, question: &str, answer: &str) {
        self.turns.push(ChatTurn::user(question));
        self.turns.push(ChatTurn::assistant(answer));
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memsearch_core::Role;

    #[test]
    fn exchange_appends_user_then_assistant() {
        let mut history = ChatHistory::new();
        history.push_exchange("q1", "a1");
        history.push_exchange("q2", "a2");

        assert_eq!(history.len(), 4);
        let roles: Vec<_> = history.turns().iter().map(|t| t.role).collect();
        assert_eq!(roles, [Role::User, Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(history.turns()[3].content, "a2");
    }

    #[test]
    fn clear_empties_history() {
        let mut history = ChatHistory::new();
        history.push_exchange("q", "a");
        history.clear();
        assert!(history.is_empty());
        history.clear();
        assert!(history.is_empty());
    }
}
