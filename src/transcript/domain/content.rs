//! Content part types representing the ordered contents of a turn.
//!
//! Stored turns carry a "parts" array that can interleave text, reasoning,
//! tool calls and tool results. This module defines the closed, typed
//! representation of those variants.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::{InvalidToolCallId, ToolCallId};

/// A single content part within a turn.
///
/// # Serialisation
///
/// Content parts are serialised with a `type` tag field:
///
/// ```json
/// { "type": "text", "text": "Hello, world!" }
/// { "type": "tool_call", "id": "...", "name": "...", "arguments": {...} }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text content.
    Text(TextPart),
    /// Provider-internal reasoning content.
    Reasoning(ReasoningPart),
    /// A tool call request from the model.
    ToolCall(ToolCallPart),
    /// A tool execution result.
    ToolResult(ToolResultPart),
}

impl ContentPart {
    /// Creates a text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextPart::new(text))
    }

    /// Creates a reasoning part.
    #[must_use]
    pub fn reasoning(text: impl Into<String>) -> Self {
        Self::Reasoning(ReasoningPart::new(text))
    }

    /// Creates a tool call part.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidToolCallId`] if `id` is blank.
    pub fn tool_call(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: Value,
    ) -> Result<Self, InvalidToolCallId> {
        Ok(Self::ToolCall(ToolCallPart::new(
            ToolCallId::new(id)?,
            name,
            arguments,
        )))
    }

    /// Creates a successful tool result part.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidToolCallId`] if `tool_call_id` is blank.
    pub fn tool_result(
        tool_call_id: impl Into<String>,
        name: impl Into<String>,
        payload: Value,
    ) -> Result<Self, InvalidToolCallId> {
        Ok(Self::ToolResult(ToolResultPart::success(
            ToolCallId::new(tool_call_id)?,
            name,
            payload,
        )))
    }

    /// Returns the kind of this part.
    #[must_use]
    pub const fn kind(&self) -> PartKind {
        match self {
            Self::Text(_) => PartKind::Text,
            Self::Reasoning(_) => PartKind::Reasoning,
            Self::ToolCall(_) => PartKind::ToolCall,
            Self::ToolResult(_) => PartKind::ToolResult,
        }
    }

    /// Returns `true` if this part is a tool result.
    #[must_use]
    pub const fn is_tool_result(&self) -> bool {
        matches!(self, Self::ToolResult(_))
    }

    /// Returns `true` if this part is a tool call.
    #[must_use]
    pub const fn is_tool_call(&self) -> bool {
        matches!(self, Self::ToolCall(_))
    }

    /// Returns the correlation id of a tool call or tool result.
    #[must_use]
    pub const fn tool_call_id(&self) -> Option<&ToolCallId> {
        match self {
            Self::ToolCall(call) => Some(&call.id),
            Self::ToolResult(result) => Some(&result.tool_call_id),
            Self::Text(_) | Self::Reasoning(_) => None,
        }
    }
}

/// The kind of a [`ContentPart`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    /// [`ContentPart::Text`].
    Text,
    /// [`ContentPart::Reasoning`].
    Reasoning,
    /// [`ContentPart::ToolCall`].
    ToolCall,
    /// [`ContentPart::ToolResult`].
    ToolResult,
}

impl PartKind {
    /// Returns the kebab-case name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Reasoning => "reasoning",
            Self::ToolCall => "tool-call",
            Self::ToolResult => "tool-result",
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text content within a turn.
///
/// # Examples
///
/// ```
/// use turnstile::transcript::domain::TextPart;
///
/// let text = TextPart::new("Hello!");
/// assert!(!text.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPart {
    /// The text content.
    pub text: String,
}

impl TextPart {
    /// Creates a new text part.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns `true` if the text content is empty or whitespace-only.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Opaque reasoning content emitted by the model.
///
/// The payload is never inspected; only its position in the turn matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningPart {
    /// The reasoning payload.
    pub text: String,
}

impl ReasoningPart {
    /// Creates a new reasoning part.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A tool call request within a model turn.
///
/// # Examples
///
/// ```
/// use turnstile::transcript::domain::{ToolCallId, ToolCallPart};
/// use serde_json::json;
///
/// let id = ToolCallId::new("call-123").expect("non-blank id");
/// let call = ToolCallPart::new(id, "read_file", json!({"path": "/tmp/test.txt"}));
/// assert_eq!(call.name, "read_file");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallPart {
    /// Unique identifier for this tool call (for matching with results).
    pub id: ToolCallId,
    /// The name of the tool being invoked.
    pub name: String,
    /// Arguments passed to the tool as JSON.
    pub arguments: Value,
}

impl ToolCallPart {
    /// Creates a new tool call part.
    #[must_use]
    pub fn new(id: ToolCallId, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id,
            name: name.into(),
            arguments,
        }
    }
}

/// A tool execution result, matched by `tool_call_id` to its request.
///
/// An error result (`is_error == true`) answers its call exactly like a
/// successful one.
///
/// # Examples
///
/// ```
/// use turnstile::transcript::domain::{ToolCallId, ToolResultPart};
/// use serde_json::json;
///
/// let id = ToolCallId::new("call-123").expect("non-blank id");
/// let result = ToolResultPart::failure(id, "read_file", "permission denied");
/// assert!(result.is_error);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResultPart {
    /// The id of the call this result answers.
    pub tool_call_id: ToolCallId,
    /// The name of the tool that produced the result.
    pub name: String,
    /// The result content (structured JSON or plain text).
    pub payload: Value,
    /// Whether the tool execution failed.
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResultPart {
    /// Creates a successful tool result.
    #[must_use]
    pub fn success(tool_call_id: ToolCallId, name: impl Into<String>, payload: Value) -> Self {
        Self {
            tool_call_id,
            name: name.into(),
            payload,
            is_error: false,
        }
    }

    /// Creates a failed tool result carrying an error message.
    #[must_use]
    pub fn failure(
        tool_call_id: ToolCallId,
        name: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            tool_call_id,
            name: name.into(),
            payload: Value::String(error.into()),
            is_error: true,
        }
    }
}
