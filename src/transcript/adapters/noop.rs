//! Diagnostics sink that discards every event.

use crate::transcript::ports::diagnostics::{DiagnosticsSink, RepairEvent};

/// A [`DiagnosticsSink`] that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl DiagnosticsSink for NoopDiagnostics {
    fn record(&self, _event: &RepairEvent) {}
}
