//! Validator port for transcript adjacency checks.

use crate::transcript::{
    domain::{Conversation, ToolCallId},
    error::{Violation, ViolationKind},
};

/// Outcome of validating a conversation.
///
/// An empty violation list means the conversation is sendable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// Creates a report from violations already ordered by turn index.
    #[must_use]
    pub const fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns `true` if the adjacency invariant holds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the violations ordered by turn index.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes the report, returning its violations.
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Iterates over the violations of the given kind.
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(move |violation| violation.kind == kind)
    }

    /// Returns `true` if any violation of `kind` names `id`.
    #[must_use]
    pub fn has(&self, kind: ViolationKind, id: &str) -> bool {
        self.of_kind(kind).any(|violation| {
            violation
                .tool_call_id
                .as_ref()
                .is_some_and(|candidate| candidate.as_str() == id)
        })
    }

    /// Iterates over the distinct tool call ids named by violations, in
    /// report order.
    pub fn ids(&self) -> impl Iterator<Item = &ToolCallId> {
        let mut seen = std::collections::HashSet::new();
        self.violations
            .iter()
            .filter_map(|violation| violation.tool_call_id.as_ref())
            .filter(move |id| seen.insert(*id))
    }
}

/// Port for transcript validation.
///
/// # Implementation Notes
///
/// Implementations must:
/// - Never mutate or panic on any input
/// - Report every violation rather than stopping at the first
/// - Be stateless and thread-safe
pub trait TranscriptValidator: Send + Sync {
    /// Checks a conversation against the adjacency invariant.
    fn validate(&self, conversation: &Conversation) -> ValidationReport;
}
