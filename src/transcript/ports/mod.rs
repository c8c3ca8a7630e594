//! Port trait definitions for the transcript subsystem.
//!
//! Ports define the abstract interfaces that the core exposes to, or requires
//! from, its collaborators. Adapters implement these ports to connect the core
//! to storage and logging infrastructure.

pub mod diagnostics;
pub mod repairer;
pub mod store;
pub mod validator;

pub use diagnostics::{DiagnosticsSink, RepairEvent};
pub use repairer::{RepairConfig, RepairStats, Repaired, TranscriptRepairer};
pub use store::ConversationStore;
pub use validator::{TranscriptValidator, ValidationReport};
