//! The conversation aggregate: an ordered transcript of turns.

use serde::{Deserialize, Serialize};

use super::{ContentPart, ToolCallId, Turn};

/// An ordered sequence of turns.
///
/// Order is the chronological transcript and is semantically significant.
/// A conversation is never edited in place by this crate: validation borrows
/// it and repair produces a new value.
///
/// # Serialisation
///
/// A conversation serialises transparently as the JSON array of its turns,
/// which is the shape storage collaborators hand over.
///
/// # Examples
///
/// ```
/// use turnstile::transcript::domain::{ContentPart, Conversation, Role, Turn};
///
/// let conversation: Conversation = vec![
///     Turn::new(Role::User, vec![ContentPart::text("Hi")]),
///     Turn::new(Role::Assistant, vec![ContentPart::text("Hello")]),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(conversation.len(), 2);
/// assert_eq!(conversation.part_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Creates a conversation from its ordered turns.
    #[must_use]
    pub const fn new(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    /// Creates a conversation with no turns.
    #[must_use]
    pub const fn empty() -> Self {
        Self { turns: Vec::new() }
    }

    /// Returns the ordered turns.
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Consumes the conversation, returning its turns.
    #[must_use]
    pub fn into_turns(self) -> Vec<Turn> {
        self.turns
    }

    /// Returns the number of turns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns `true` if the conversation has no turns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Iterates over every part of every turn in transcript order.
    pub fn parts(&self) -> impl Iterator<Item = &ContentPart> {
        self.turns.iter().flat_map(Turn::parts)
    }

    /// Returns the total number of parts across all turns.
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.turns.iter().map(|turn| turn.parts().len()).sum()
    }

    /// Iterates over every tool call id in transcript order.
    pub fn tool_call_ids(&self) -> impl Iterator<Item = &ToolCallId> {
        self.turns.iter().flat_map(Turn::tool_call_ids)
    }

    /// Iterates over every id answered by a tool result, in transcript order.
    pub fn tool_result_ids(&self) -> impl Iterator<Item = &ToolCallId> {
        self.turns.iter().flat_map(Turn::tool_result_ids)
    }
}

impl FromIterator<Turn> for Conversation {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Turn>> for Conversation {
    fn from(turns: Vec<Turn>) -> Self {
        Self::new(turns)
    }
}
