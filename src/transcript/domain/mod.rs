//! Domain types for the transcript subsystem.
//!
//! This module contains pure domain types with no infrastructure dependencies.
//! All types are immutable after construction and serialisable via serde.

mod content;
mod conversation;
mod ids;
mod role;
mod turn;

pub use content::{
    ContentPart, PartKind, ReasoningPart, TextPart, ToolCallPart, ToolResultPart,
};
pub use conversation::Conversation;
pub use ids::{ConversationId, InvalidToolCallId, ToolCallId};
pub use role::{ParseRoleError, Role};
pub use turn::{Turn, TurnShape};
