//! A single role-tagged group of content parts.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ContentPart, PartKind, Role, ToolCallId};

/// One turn of a conversation.
///
/// A turn is whatever one role contributed in one step of the transcript.
/// Stored turns may interleave every kind of part; the adjacency validator
/// decides whether the grouping is acceptable to a provider.
///
/// # Examples
///
/// ```
/// use turnstile::transcript::domain::{ContentPart, Role, Turn};
///
/// let turn = Turn::new(Role::User, vec![ContentPart::text("Hello")]);
/// assert_eq!(turn.role(), Role::User);
/// assert!(!turn.has_tool_calls());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    parts: Vec<ContentPart>,
}

impl Turn {
    /// Creates a turn from a role and its ordered parts.
    #[must_use]
    pub const fn new(role: Role, parts: Vec<ContentPart>) -> Self {
        Self { role, parts }
    }

    /// Appends a part, returning the updated turn.
    #[must_use]
    pub fn with_part(mut self, part: ContentPart) -> Self {
        self.parts.push(part);
        self
    }

    /// Returns the role of the turn.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the ordered parts of the turn.
    #[must_use]
    pub fn parts(&self) -> &[ContentPart] {
        &self.parts
    }

    /// Consumes the turn, returning its parts.
    #[must_use]
    pub fn into_parts(self) -> Vec<ContentPart> {
        self.parts
    }

    /// Returns `true` if the turn has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns `true` if any part is a tool call.
    #[must_use]
    pub fn has_tool_calls(&self) -> bool {
        self.parts.iter().any(ContentPart::is_tool_call)
    }

    /// Returns `true` if any part is a tool result.
    #[must_use]
    pub fn has_tool_results(&self) -> bool {
        self.parts.iter().any(ContentPart::is_tool_result)
    }

    /// Returns `true` if the turn is non-empty and holds only tool results.
    #[must_use]
    pub fn is_result_only(&self) -> bool {
        !self.parts.is_empty() && self.parts.iter().all(ContentPart::is_tool_result)
    }

    /// Returns `true` if tool results share the turn with other part kinds.
    #[must_use]
    pub fn is_mixed(&self) -> bool {
        self.has_tool_results() && !self.is_result_only()
    }

    /// Iterates over the ids of the tool calls in this turn, in order.
    pub fn tool_call_ids(&self) -> impl Iterator<Item = &ToolCallId> {
        self.parts.iter().filter_map(|part| match part {
            ContentPart::ToolCall(call) => Some(&call.id),
            _ => None,
        })
    }

    /// Iterates over the call ids answered by tool results in this turn, in order.
    pub fn tool_result_ids(&self) -> impl Iterator<Item = &ToolCallId> {
        self.parts.iter().filter_map(|part| match part {
            ContentPart::ToolResult(result) => Some(&result.tool_call_id),
            _ => None,
        })
    }

    /// Iterates over `(part position, id)` for every tool call in this turn.
    pub fn tool_call_positions(&self) -> impl Iterator<Item = (usize, &ToolCallId)> {
        self.parts
            .iter()
            .enumerate()
            .filter_map(|(position, part)| match part {
                ContentPart::ToolCall(call) => Some((position, &call.id)),
                _ => None,
            })
    }

    /// Iterates over `(part position, id)` for every tool result in this turn.
    pub fn tool_result_positions(&self) -> impl Iterator<Item = (usize, &ToolCallId)> {
        self.parts
            .iter()
            .enumerate()
            .filter_map(|(position, part)| match part {
                ContentPart::ToolResult(result) => Some((position, &result.tool_call_id)),
                _ => None,
            })
    }

    /// Returns the structural outline of the turn: its role and part kinds.
    #[must_use]
    pub fn shape(&self) -> TurnShape {
        TurnShape {
            role: self.role,
            kinds: self.parts.iter().map(ContentPart::kind).collect(),
        }
    }

    pub(crate) fn extend_parts(&mut self, parts: impl IntoIterator<Item = ContentPart>) {
        self.parts.extend(parts);
    }
}

/// Role and part-kind sequence of a turn, free of any payload.
///
/// Shapes are safe to log: they never contain text, arguments or results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnShape {
    /// The role of the turn.
    pub role: Role,
    /// The kinds of the parts, in order.
    pub kinds: Vec<PartKind>,
}

impl fmt::Display for TurnShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [", self.role)?;
        for (index, kind) in self.kinds.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(kind.as_str())?;
        }
        f.write_str("]")
    }
}
