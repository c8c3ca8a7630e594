//! Repair service implementation.
//!
//! Provides the default implementation of the `TranscriptRepairer` port:
//! flatten, merge, then re-validate, with a fast path for valid input.

use crate::transcript::{
    diagnostics::describe,
    domain::Conversation,
    error::StructuralError,
    ports::{
        diagnostics::{DiagnosticsSink, RepairEvent},
        repairer::{RepairConfig, RepairStats, Repaired, TranscriptRepairer},
        validator::TranscriptValidator,
    },
    repair::{classify, flatten, merge},
    validation::AdjacencyValidator,
};

/// Default implementation of the transcript repairer.
///
/// Repair is attempted once per call and never searches beyond what
/// flattening and merging bring next to each other.
///
/// # Examples
///
/// ```
/// use turnstile::transcript::domain::{ContentPart, Conversation, Role, Turn};
/// use turnstile::transcript::ports::repairer::{RepairConfig, TranscriptRepairer};
/// use turnstile::transcript::repair::AdjacencyRepairer;
/// use serde_json::json;
///
/// let stored = Conversation::new(vec![Turn::new(
///     Role::Assistant,
///     vec![
///         ContentPart::tool_call("call-1", "search", json!({}))?,
///         ContentPart::tool_result("call-1", "search", json!([]))?,
///     ],
/// )]);
///
/// let repairer = AdjacencyRepairer::with_config(RepairConfig::user_carrier());
/// let repaired = repairer.repair(&stored)?;
/// assert_eq!(repaired.turns()[1].role(), Role::User);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AdjacencyRepairer {
    config: RepairConfig,
    validator: AdjacencyValidator,
}

impl AdjacencyRepairer {
    /// Creates a repairer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repairer with a custom configuration.
    #[must_use]
    pub const fn with_config(config: RepairConfig) -> Self {
        Self {
            config,
            validator: AdjacencyValidator::new(),
        }
    }

    /// Returns the current repair configuration.
    #[must_use]
    pub const fn config(&self) -> &RepairConfig {
        &self.config
    }

    /// Repairs a conversation and reports the outcome to `sink`.
    ///
    /// A successful repair that changed something is recorded as
    /// [`RepairEvent::Repaired`] with before and after summaries prefixed by
    /// `label`; a failure is recorded as [`RepairEvent::Rejected`]. Valid
    /// input is returned without recording anything.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError`] if violations remain after regrouping.
    pub fn repair_with_sink<D>(
        &self,
        conversation: &Conversation,
        label: &str,
        sink: &D,
    ) -> Result<Repaired, StructuralError>
    where
        D: DiagnosticsSink + ?Sized,
    {
        match self.repair_with_stats(conversation) {
            Ok(repaired) => {
                if !repaired.stats.is_noop() {
                    sink.record(&RepairEvent::Repaired {
                        label: label.to_owned(),
                        stats: repaired.stats,
                        before: describe(conversation, &format!("{label} (stored)")),
                        after: describe(&repaired.conversation, &format!("{label} (repaired)")),
                    });
                }
                Ok(repaired)
            }
            Err(error) => {
                sink.record(&RepairEvent::Rejected {
                    label: label.to_owned(),
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    fn regroup(&self, conversation: &Conversation) -> (Conversation, RepairStats) {
        let mut stats = RepairStats::default();
        let flattened = flatten::flatten(
            conversation.clone().into_turns(),
            self.config.result_carrier,
            &mut stats,
        );
        let turns = if self.config.merge_adjacent {
            merge::merge_adjacent(flattened, &mut stats)
        } else {
            flattened
        };
        (Conversation::new(turns), stats)
    }
}

impl TranscriptRepairer for AdjacencyRepairer {
    fn repair_with_stats(
        &self,
        conversation: &Conversation,
    ) -> Result<Repaired, StructuralError> {
        if self.validator.validate(conversation).is_valid() {
            return Ok(Repaired {
                conversation: conversation.clone(),
                stats: RepairStats::default(),
            });
        }

        let (candidate, stats) = self.regroup(conversation);
        let report = self.validator.validate(&candidate);
        if report.is_valid() {
            Ok(Repaired {
                conversation: candidate,
                stats,
            })
        } else {
            Err(classify::unresolved(conversation, &report))
        }
    }
}
