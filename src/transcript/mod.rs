//! Conversation transcripts and their tool-call adjacency rules.
//!
//! This module implements the transcript model, the adjacency validator, the
//! repair engine and the replay preparation service that ties them to a
//! storage collaborator.
//!
//! # Architecture
//!
//! The module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure domain types ([`domain::Conversation`], [`domain::Turn`], [`domain::ContentPart`], etc.)
//! - **Ports**: Abstract trait interfaces ([`ports::validator::TranscriptValidator`], [`ports::repairer::TranscriptRepairer`], [`ports::store::ConversationStore`], [`ports::diagnostics::DiagnosticsSink`])
//! - **Adapters**: Concrete implementations ([`adapters::memory::InMemoryConversationStore`], [`adapters::tracing_sink::TracingDiagnostics`])
//! - **Validation**: Adjacency rule enforcement before replay
//! - **Repair**: Flattening and regrouping of loosely stored turns
//!
//! # Example
//!
//! ```
//! use turnstile::transcript::domain::{ContentPart, Conversation, Role, Turn};
//! use turnstile::transcript::repair::repair;
//! use turnstile::transcript::validation::validate;
//! use serde_json::json;
//!
//! let stored = Conversation::new(vec![Turn::new(
//!     Role::Assistant,
//!     vec![
//!         ContentPart::text("Let me check"),
//!         ContentPart::tool_call("call-1", "read_file", json!({"path": "a.txt"}))?,
//!         ContentPart::tool_result("call-1", "read_file", json!("contents"))?,
//!         ContentPart::text("done"),
//!     ],
//! )]);
//!
//! assert!(!validate(&stored).is_valid());
//! let repaired = repair(&stored)?;
//! assert!(validate(&repaired).is_valid());
//! assert_eq!(repaired.len(), 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod adapters;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod ports;
pub mod repair;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
