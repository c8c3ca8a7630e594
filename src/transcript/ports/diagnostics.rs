//! Diagnostics sink port.
//!
//! The core never writes logs itself. Callers that want visibility into
//! validation and repair pass a [`DiagnosticsSink`] into the operations that
//! accept one and decide where the events go.

use crate::transcript::{error::StructuralError, ports::repairer::RepairStats};

use super::validator::ValidationReport;

/// An observable step of preparing a conversation for replay.
#[derive(Debug, Clone, PartialEq)]
pub enum RepairEvent {
    /// A conversation was validated.
    Validated {
        /// Caller-supplied label identifying the conversation.
        label: String,
        /// The validation outcome.
        report: ValidationReport,
    },
    /// A conversation was repaired.
    Repaired {
        /// Caller-supplied label identifying the conversation.
        label: String,
        /// What the repair changed.
        stats: RepairStats,
        /// Structural summary before repair.
        before: String,
        /// Structural summary after repair.
        after: String,
    },
    /// A conversation could not be repaired.
    Rejected {
        /// Caller-supplied label identifying the conversation.
        label: String,
        /// The fatal error.
        error: StructuralError,
    },
}

impl RepairEvent {
    /// Returns the label carried by the event.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Validated { label, .. }
            | Self::Repaired { label, .. }
            | Self::Rejected { label, .. } => label,
        }
    }
}

/// Port receiving diagnostic events.
///
/// Implementations must not fail or block for long: events are emitted on
/// the request path.
pub trait DiagnosticsSink: Send + Sync {
    /// Records one event.
    fn record(&self, event: &RepairEvent);
}
