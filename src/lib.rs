//! Turnstile: tool-call adjacency validation and repair for LLM transcripts.
//!
//! Chat providers require that a turn carrying tool calls is followed
//! immediately by a turn carrying only the matching tool results. Stored
//! conversations are rarely in that shape, because they accumulate whatever
//! arrived during a model turn. This crate checks stored conversations against
//! that rule and regroups them into a sendable turn sequence.
//!
//! # Architecture
//!
//! Turnstile follows hexagonal architecture principles:
//!
//! - **Domain**: Pure transcript types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for validation, repair, storage and diagnostics
//! - **Adapters**: Concrete implementations of ports (in-memory storage, `tracing` sink)
//!
//! # Modules
//!
//! - [`transcript`]: Conversation model, validator, repair engine and replay preparation

pub mod transcript;
