//! Diagnostics sink backed by `tracing`.

use tracing::{debug, error, warn};

use crate::transcript::ports::diagnostics::{DiagnosticsSink, RepairEvent};

/// A [`DiagnosticsSink`] that emits each event as a structured `tracing`
/// event.
///
/// Validation outcomes are logged at `debug`, applied repairs at `warn` with
/// one field per counter, and rejected conversations at `error`. Structural
/// summaries are logged at `debug` only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn record(&self, event: &RepairEvent) {
        match event {
            RepairEvent::Validated { label, report } => {
                debug!(
                    label = %label,
                    valid = report.is_valid(),
                    violations = report.violations().len(),
                    "Transcript validated"
                );
            }
            RepairEvent::Repaired {
                label,
                stats,
                before,
                after,
            } => {
                warn!(
                    label = %label,
                    split = stats.turns_split,
                    regrouped = stats.results_regrouped,
                    reassigned = stats.roles_reassigned,
                    merged = stats.turns_merged,
                    empty = stats.empty_turns_dropped,
                    "Transcript repair applied fixes"
                );
                debug!(label = %label, before = %before, after = %after, "Transcript shape");
            }
            RepairEvent::Rejected { label, error } => {
                error!(
                    label = %label,
                    unresolved = error.unresolved().len(),
                    error = %error,
                    "Transcript could not be repaired"
                );
            }
        }
    }
}
