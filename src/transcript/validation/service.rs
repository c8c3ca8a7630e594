//! Validation service implementation.
//!
//! Provides the default implementation of the `TranscriptValidator` port,
//! walking the transcript once and applying every rule to each turn.

use std::collections::HashSet;

use crate::transcript::{
    domain::{Conversation, ToolCallId},
    ports::validator::{TranscriptValidator, ValidationReport},
    validation::rules::{self, PendingCalls},
};

/// Default implementation of the transcript validator.
///
/// Walks turns in order, carrying the call ids opened by the previous turn,
/// and collects every violation rather than stopping at the first.
///
/// # Examples
///
/// ```
/// use turnstile::transcript::domain::{ContentPart, Conversation, Role, Turn};
/// use turnstile::transcript::error::ViolationKind;
/// use turnstile::transcript::ports::validator::TranscriptValidator;
/// use turnstile::transcript::validation::AdjacencyValidator;
/// use serde_json::json;
///
/// let conversation = Conversation::new(vec![Turn::new(
///     Role::Assistant,
///     vec![ContentPart::tool_call("call-1", "search", json!({}))?],
/// )]);
///
/// let report = AdjacencyValidator::new().validate(&conversation);
/// assert!(report.has(ViolationKind::MissingOrMisplacedResult, "call-1"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjacencyValidator;

impl AdjacencyValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TranscriptValidator for AdjacencyValidator {
    fn validate(&self, conversation: &Conversation) -> ValidationReport {
        let mut violations = Vec::new();
        let mut seen_calls: HashSet<&ToolCallId> = HashSet::new();
        let mut pending = PendingCalls::default();

        for (index, turn) in conversation.turns().iter().enumerate() {
            violations.extend(rules::check_mixed_turn(index, turn));
            violations.extend(rules::check_orphan_results(index, turn, &pending));
            violations.extend(rules::check_pending_results(&pending, Some(turn)));
            violations.extend(rules::check_duplicate_calls(index, turn, &mut seen_calls));

            pending = PendingCalls::opened_by(index, turn);
        }
        violations.extend(rules::check_pending_results(&pending, None));

        // Stable: ties on the same part keep discovery order.
        violations.sort_by_key(|violation| (violation.turn_index, violation.part_index));
        ValidationReport::new(violations)
    }
}
