//! Structural summaries of conversations for logs and assertions.
//!
//! Summaries list roles and part kinds only. They never include text,
//! arguments or payloads, so they are safe to write to internal logs.

use crate::transcript::domain::Conversation;

/// Describes the structure of a conversation, one line per turn.
///
/// The first line is `label`; each following line reads
/// `  [index] role: [kind, kind, ...]`.
///
/// # Examples
///
/// ```
/// use turnstile::transcript::diagnostics::describe;
/// use turnstile::transcript::domain::{ContentPart, Conversation, Role, Turn};
/// use serde_json::json;
///
/// let conversation = Conversation::new(vec![Turn::new(
///     Role::Assistant,
///     vec![
///         ContentPart::text("Let me check"),
///         ContentPart::tool_call("call-1", "search", json!({}))?,
///     ],
/// )]);
///
/// assert_eq!(
///     describe(&conversation, "outbound"),
///     "outbound\n  [0] assistant: [text, tool-call]"
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn describe(conversation: &Conversation, label: &str) -> String {
    if conversation.is_empty() {
        return format!("{label}\n  (empty)");
    }

    let lines = conversation
        .turns()
        .iter()
        .enumerate()
        .map(|(index, turn)| format!("  [{index}] {}", turn.shape()));
    std::iter::once(label.to_owned())
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n")
}
