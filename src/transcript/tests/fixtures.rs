//! Shared fixtures and part builders for transcript tests.

use crate::transcript::{
    domain::{
        ContentPart, Conversation, ReasoningPart, Role, TextPart, ToolCallId, ToolCallPart,
        ToolResultPart, Turn,
    },
    repair::AdjacencyRepairer,
    validation::AdjacencyValidator,
};
use rstest::fixture;
use serde_json::json;

#[fixture]
pub fn validator() -> AdjacencyValidator {
    AdjacencyValidator::new()
}

#[fixture]
pub fn repairer() -> AdjacencyRepairer {
    AdjacencyRepairer::new()
}

pub fn id(value: &str) -> ToolCallId {
    ToolCallId::new(value).expect("test id should be valid")
}

pub fn text(value: &str) -> ContentPart {
    ContentPart::Text(TextPart::new(value))
}

pub fn reasoning(value: &str) -> ContentPart {
    ContentPart::Reasoning(ReasoningPart::new(value))
}

/// A `lookup` tool call whose arguments echo its id.
pub fn call(call_id: &str) -> ContentPart {
    ContentPart::ToolCall(ToolCallPart::new(
        id(call_id),
        "lookup",
        json!({ "key": call_id }),
    ))
}

/// A successful `lookup` result for `call_id`.
pub fn result(call_id: &str) -> ContentPart {
    ContentPart::ToolResult(ToolResultPart::success(
        id(call_id),
        "lookup",
        json!({ "value": call_id }),
    ))
}

/// A failed `lookup` result for `call_id`.
pub fn error_result(call_id: &str) -> ContentPart {
    ContentPart::ToolResult(ToolResultPart::failure(id(call_id), "lookup", "timed out"))
}

pub fn turn(role: Role, parts: Vec<ContentPart>) -> Turn {
    Turn::new(role, parts)
}

pub fn conversation(turns: Vec<Turn>) -> Conversation {
    Conversation::new(turns)
}
