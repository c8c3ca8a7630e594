//! Identifier newtypes for conversations and tool calls.
//!
//! These types keep storage keys and tool-call correlation ids apart so that a
//! conversation key can never be mistaken for a call id and vice versa.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Storage key for a persisted conversation.
///
/// # Examples
///
/// ```
/// use turnstile::transcript::domain::ConversationId;
///
/// let id = ConversationId::new();
/// assert!(!id.as_ref().is_nil());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(Uuid);

impl ConversationId {
    /// Creates a new random conversation identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a conversation identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

/// Note: This implementation generates a new random UUID on each call,
/// which is non-standard behaviour for `Default`.
impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for ConversationId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a tool call identifier is blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tool call id must not be blank")]
pub struct InvalidToolCallId;

/// Correlation identifier linking a tool call to its result.
///
/// Identifiers are provider-issued opaque strings. The only structural rule
/// is that they are not blank; uniqueness is a conversation-level invariant
/// checked by the validator.
///
/// # Examples
///
/// ```
/// use turnstile::transcript::domain::ToolCallId;
///
/// let id = ToolCallId::new("call-123").expect("non-blank id");
/// assert_eq!(id.as_str(), "call-123");
/// assert!(ToolCallId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToolCallId(String);

impl ToolCallId {
    /// Creates a tool call identifier.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidToolCallId`] if the identifier is empty or
    /// whitespace-only.
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidToolCallId> {
        let value = id.into();
        if value.trim().is_empty() {
            return Err(InvalidToolCallId);
        }
        Ok(Self(value))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ToolCallId {
    type Error = InvalidToolCallId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ToolCallId {
    type Error = InvalidToolCallId;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ToolCallId> for String {
    fn from(id: ToolCallId) -> Self {
        id.0
    }
}

impl Borrow<str> for ToolCallId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ToolCallId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolCallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
