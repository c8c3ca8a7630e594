//! Adapters for the transcript ports.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryConversationStore`]: Thread-safe in-memory storage
//!   collaborator for tests and embedding
//! - [`tracing_sink::TracingDiagnostics`]: Diagnostics sink emitting
//!   structured `tracing` events
//! - [`noop::NoopDiagnostics`]: Diagnostics sink discarding every event

pub mod memory;
pub mod noop;
pub mod tracing_sink;

pub use memory::InMemoryConversationStore;
pub use noop::NoopDiagnostics;
pub use tracing_sink::TracingDiagnostics;
