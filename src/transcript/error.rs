//! Error and violation types for transcript validation, repair and replay.
//!
//! Uses `thiserror` for ergonomic error handling with typed variants
//! that can be inspected by callers.

use super::domain::{ConversationId, ToolCallId};
use std::fmt;
use thiserror::Error;

/// The kind of adjacency breach found by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// A turn mixes tool results with other part kinds.
    MixedResultTurn,
    /// A tool call is not answered exactly once in the next turn.
    MissingOrMisplacedResult,
    /// A tool result does not answer a call from the previous turn.
    OrphanResult,
    /// A tool call id is used by more than one call.
    DuplicateCallId,
}

impl ViolationKind {
    /// Returns the stable kebab-case name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MixedResultTurn => "mixed-result-turn",
            Self::MissingOrMisplacedResult => "missing-or-misplaced-result",
            Self::OrphanResult => "orphan-result",
            Self::DuplicateCallId => "duplicate-call-id",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single breach of the adjacency invariant.
///
/// Violations are descriptive, not fatal: the validator returns them in a
/// report and never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Index of the turn the violation is reported against.
    pub turn_index: usize,
    /// Position of the offending part within that turn; `0` for violations
    /// that concern the whole turn.
    pub part_index: usize,
    /// The affected tool call id, when the violation concerns one.
    pub tool_call_id: Option<ToolCallId>,
    /// What was breached.
    pub kind: ViolationKind,
    /// Human-readable description for logs.
    pub detail: String,
}

impl Violation {
    /// Creates a violation that concerns a specific tool call id.
    #[must_use]
    pub fn for_call(
        turn_index: usize,
        part_index: usize,
        tool_call_id: ToolCallId,
        kind: ViolationKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            turn_index,
            part_index,
            tool_call_id: Some(tool_call_id),
            kind,
            detail: detail.into(),
        }
    }

    /// Creates a violation that concerns a whole turn.
    #[must_use]
    pub fn for_turn(turn_index: usize, kind: ViolationKind, detail: impl Into<String>) -> Self {
        Self {
            turn_index,
            part_index: 0,
            tool_call_id: None,
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at turn {}", self.kind, self.turn_index)?;
        if let Some(id) = &self.tool_call_id {
            write!(f, " for '{id}'")?;
        }
        write!(f, ": {}", self.detail)
    }
}

/// Why a violation survived repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnresolvedCause {
    /// The counterpart call or result does not exist in the right place in
    /// the stored transcript at all.
    Missing,
    /// The id is used more than once by calls, or answered more than once.
    Duplicate,
    /// The counterpart exists, but more than one turn boundary away.
    NotAdjacent,
}

impl UnresolvedCause {
    /// Returns the stable kebab-case name of the cause.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Duplicate => "duplicate",
            Self::NotAdjacent => "not-adjacent",
        }
    }
}

impl fmt::Display for UnresolvedCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A violation that repair could not remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedId {
    /// The affected tool call id, if any.
    pub tool_call_id: Option<ToolCallId>,
    /// The violation kind still present after repair.
    pub kind: ViolationKind,
    /// Turn index in the regrouped conversation.
    pub turn_index: usize,
    /// Classification against the stored transcript.
    pub cause: UnresolvedCause,
}

impl fmt::Display for UnresolvedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tool_call_id {
            Some(id) => write!(
                f,
                "{} for '{id}' at turn {} ({})",
                self.kind, self.turn_index, self.cause
            ),
            None => write!(f, "{} at turn {} ({})", self.kind, self.turn_index, self.cause),
        }
    }
}

/// Fatal error: the conversation cannot be made to satisfy the adjacency
/// invariant by regrouping alone.
///
/// Retrying with the same input fails identically. The entries name internal
/// tool call ids and belong in logs, never in user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transcript has {} unresolved structural violation(s): {}", .unresolved.len(), format_unresolved(.unresolved))]
pub struct StructuralError {
    unresolved: Vec<UnresolvedId>,
}

fn format_unresolved(unresolved: &[UnresolvedId]) -> String {
    unresolved
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl StructuralError {
    /// Creates a structural error from the unresolved entries.
    #[must_use]
    pub const fn new(unresolved: Vec<UnresolvedId>) -> Self {
        Self { unresolved }
    }

    /// Returns every unresolved entry.
    #[must_use]
    pub fn unresolved(&self) -> &[UnresolvedId] {
        &self.unresolved
    }

    /// Iterates over the tool call ids named by the unresolved entries.
    pub fn ids(&self) -> impl Iterator<Item = &ToolCallId> {
        self.unresolved
            .iter()
            .filter_map(|entry| entry.tool_call_id.as_ref())
    }

    /// Iterates over the violation kinds of the unresolved entries.
    pub fn kinds(&self) -> impl Iterator<Item = ViolationKind> + '_ {
        self.unresolved.iter().map(|entry| entry.kind)
    }

    /// Returns `true` if any unresolved entry names `id`.
    #[must_use]
    pub fn names(&self, id: &str) -> bool {
        self.ids().any(|candidate| candidate.as_str() == id)
    }
}

/// Errors reported by a conversation store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No conversation is stored under the key.
    #[error("conversation not found: {0}")]
    NotFound(ConversationId),

    /// The store could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// The stored record could not be decoded into a conversation.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }
}

/// Errors raised while preparing a stored conversation for replay.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// The conversation could not be loaded.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The conversation could not be repaired.
    #[error(transparent)]
    Structural(#[from] StructuralError),
}

impl ReplayError {
    /// Generic message suitable for end users.
    pub const USER_MESSAGE: &'static str = "this conversation could not be sent";

    /// Returns the message to show end users.
    ///
    /// Internal detail, including tool call ids, is never included.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        Self::USER_MESSAGE
    }
}
