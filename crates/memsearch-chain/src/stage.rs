// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! What a context stage hands to composition.

/// How a stage arrived at its text.
///
/// Lets callers tell "nothing relevant" apart from "backend unreachable",
/// which the prompt text alone cannot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageStatus {
    /// The text carries real context from the backend.
    Supplied,
    /// The backend answered with nothing usable.
    Empty,
    /// The stage chose not to call its backend.
    Skipped,
    /// The backend or a model call failed; the text is a stand-in.
    Degraded(String),
}

impl StageStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

/// Plain-text context produced by a stage, with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageContext {
    pub text: String,
    pub status: StageStatus,
}

impl StageContext {
    pub fn supplied(text: impl Into<String>) -> Self {
        Self::with_status(text, StageStatus::Supplied)
    }

    pub fn empty(text: impl Into<String>) -> Self {
        Self::with_status(text, StageStatus::Empty)
    }

    pub fn skipped(text: impl Into<String>) -> Self {
        Self::with_status(text, StageStatus::Skipped)
    }

    pub fn degraded(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::with_status(text, StageStatus::Degraded(reason.into()))
    }

    fn with_status(text: impl Into<String>, status: StageStatus) -> Self {
        Self {
            text: text.into(),
            status,
        }
    }
}
