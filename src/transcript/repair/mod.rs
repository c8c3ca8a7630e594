//! Repair engine for transcripts that break the adjacency invariant.
//!
//! Repair runs in three steps:
//!
//! 1. **Flatten**: split every stored turn into result-only and result-free
//!    turns, gathering results that answer the same call group.
//! 2. **Merge**: fold adjacent turns of the same role and kind together.
//! 3. **Verify**: re-validate; anything still invalid becomes a
//!    [`StructuralError`].
//!
//! Valid input is returned unchanged, so repair is idempotent.

mod classify;
mod flatten;
mod merge;
pub mod service;

pub use service::AdjacencyRepairer;

use crate::transcript::{
    domain::Conversation,
    error::StructuralError,
    ports::repairer::{Repaired, TranscriptRepairer},
};

/// Repairs a conversation with the default [`AdjacencyRepairer`].
///
/// # Errors
///
/// Returns [`StructuralError`] if violations remain after regrouping.
pub fn repair(conversation: &Conversation) -> Result<Conversation, StructuralError> {
    AdjacencyRepairer::new().repair(conversation)
}

/// Repairs a conversation with the default [`AdjacencyRepairer`], also
/// reporting what changed.
///
/// # Errors
///
/// Returns [`StructuralError`] if violations remain after regrouping.
pub fn repair_with_stats(conversation: &Conversation) -> Result<Repaired, StructuralError> {
    AdjacencyRepairer::new().repair_with_stats(conversation)
}
