//! Repairer port and its configuration.

use crate::transcript::{
    domain::{Conversation, Role},
    error::StructuralError,
};

/// Configuration for the repair engine.
///
/// # Examples
///
/// ```
/// use turnstile::transcript::domain::Role;
/// use turnstile::transcript::ports::repairer::RepairConfig;
///
/// let config = RepairConfig::default();
/// assert_eq!(config.result_carrier, Role::Tool);
///
/// let anthropic_style = RepairConfig::user_carrier();
/// assert_eq!(anthropic_style.result_carrier, Role::User);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairConfig {
    /// Role given to turns split out to carry tool results.
    pub result_carrier: Role,
    /// Whether adjacent turns of the same role and kind are merged after
    /// flattening.
    pub merge_adjacent: bool,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            result_carrier: Role::Tool,
            merge_adjacent: true,
        }
    }
}

impl RepairConfig {
    /// Creates a configuration for providers that carry tool results in
    /// user turns.
    #[must_use]
    pub fn user_carrier() -> Self {
        Self::default().with_result_carrier(Role::User)
    }

    /// Sets the result-carrier role.
    #[must_use]
    pub const fn with_result_carrier(mut self, role: Role) -> Self {
        self.result_carrier = role;
        self
    }

    /// Enables or disables the merge step.
    #[must_use]
    pub const fn with_merge_adjacent(mut self, merge_adjacent: bool) -> Self {
        self.merge_adjacent = merge_adjacent;
        self
    }
}

/// Counters describing what a repair changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairStats {
    /// Number of stored turns split into more than one turn.
    pub turns_split: usize,
    /// Number of tool results moved ahead of unrelated content to join the
    /// result turn of their call group.
    pub results_regrouped: usize,
    /// Number of result turns moved into the result-carrier role.
    pub roles_reassigned: usize,
    /// Number of turns folded into an adjacent turn of the same role and kind.
    pub turns_merged: usize,
    /// Number of turns dropped because they had no parts.
    pub empty_turns_dropped: usize,
}

impl RepairStats {
    /// Returns `true` if the repair changed nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// A successfully repaired conversation with the changes applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Repaired {
    /// The conversation satisfying the adjacency invariant.
    pub conversation: Conversation,
    /// What the repair changed.
    pub stats: RepairStats,
}

/// Port for transcript repair.
///
/// # Implementation Notes
///
/// Implementations must:
/// - Return valid input unchanged
/// - Be deterministic and idempotent
/// - Never drop or duplicate content parts
pub trait TranscriptRepairer: Send + Sync {
    /// Repairs a conversation, returning the repaired conversation.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError`] if violations remain after regrouping.
    fn repair(&self, conversation: &Conversation) -> Result<Conversation, StructuralError> {
        self.repair_with_stats(conversation)
            .map(|repaired| repaired.conversation)
    }

    /// Repairs a conversation, also reporting what changed.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError`] if violations remain after regrouping.
    fn repair_with_stats(&self, conversation: &Conversation)
    -> Result<Repaired, StructuralError>;
}
