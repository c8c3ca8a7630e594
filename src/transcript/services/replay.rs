//! Replay preparation service.
//!
//! The `ReplayPreparer` is the hand-off point between the storage collaborator
//! and the provider client: it loads a stored conversation, validates it,
//! repairs it when needed, and returns a conversation that is safe to send.

use std::sync::Arc;

use crate::transcript::{
    domain::{Conversation, ConversationId},
    error::ReplayError,
    ports::{
        diagnostics::{DiagnosticsSink, RepairEvent},
        repairer::{RepairConfig, RepairStats},
        store::ConversationStore,
        validator::TranscriptValidator,
    },
    repair::AdjacencyRepairer,
    validation::AdjacencyValidator,
};

/// A conversation ready for the provider client.
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    /// The conversation satisfying the adjacency invariant.
    pub conversation: Conversation,
    /// Whether the stored conversation needed repair.
    pub repaired: bool,
    /// What the repair changed; all zero when no repair was needed.
    pub stats: RepairStats,
}

/// Service preparing stored conversations for replay to a provider.
///
/// Orchestrates the complete workflow:
/// 1. Loads the conversation from the store
/// 2. Validates it and records the outcome
/// 3. Repairs it if invalid, recording the repair or rejection
///
/// The stored record is never modified.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use turnstile::transcript::adapters::{InMemoryConversationStore, NoopDiagnostics};
/// use turnstile::transcript::domain::{ContentPart, Conversation, Role, Turn};
/// use turnstile::transcript::services::ReplayPreparer;
/// use serde_json::json;
///
/// let preparer = ReplayPreparer::new(
///     Arc::new(InMemoryConversationStore::new()),
///     Arc::new(NoopDiagnostics),
/// );
/// let stored = Conversation::new(vec![Turn::new(
///     Role::Assistant,
///     vec![
///         ContentPart::tool_call("call-1", "search", json!({}))?,
///         ContentPart::tool_result("call-1", "search", json!([]))?,
///     ],
/// )]);
///
/// let prepared = preparer.prepare_loaded(&stored, "session-42")?;
/// assert!(prepared.repaired);
/// assert_eq!(prepared.conversation.len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct ReplayPreparer<S, D>
where
    S: ConversationStore,
    D: DiagnosticsSink,
{
    store: Arc<S>,
    sink: Arc<D>,
    validator: AdjacencyValidator,
    repairer: AdjacencyRepairer,
}

impl<S, D> ReplayPreparer<S, D>
where
    S: ConversationStore,
    D: DiagnosticsSink,
{
    /// Creates a preparer with the default repair configuration.
    #[must_use]
    pub fn new(store: Arc<S>, sink: Arc<D>) -> Self {
        Self::with_config(store, sink, RepairConfig::default())
    }

    /// Creates a preparer with a custom repair configuration.
    #[must_use]
    pub const fn with_config(store: Arc<S>, sink: Arc<D>, config: RepairConfig) -> Self {
        Self {
            store,
            sink,
            validator: AdjacencyValidator::new(),
            repairer: AdjacencyRepairer::with_config(config),
        }
    }

    /// Loads, validates and, if needed, repairs the conversation stored
    /// under `id`.
    ///
    /// Events are labelled with the conversation id.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Store`] if loading fails, or
    /// [`ReplayError::Structural`] if the conversation cannot be repaired.
    pub async fn prepare(&self, id: ConversationId) -> Result<Prepared, ReplayError> {
        let conversation = self.store.load(id).await?;
        self.prepare_loaded(&conversation, &id.to_string())
    }

    /// Validates and, if needed, repairs a conversation the caller already
    /// loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Structural`] if the conversation cannot be
    /// repaired.
    pub fn prepare_loaded(
        &self,
        conversation: &Conversation,
        label: &str,
    ) -> Result<Prepared, ReplayError> {
        let report = self.validator.validate(conversation);
        let valid = report.is_valid();
        self.sink.record(&RepairEvent::Validated {
            label: label.to_owned(),
            report,
        });

        if valid {
            return Ok(Prepared {
                conversation: conversation.clone(),
                repaired: false,
                stats: RepairStats::default(),
            });
        }

        let repaired = self
            .repairer
            .repair_with_sink(conversation, label, self.sink.as_ref())?;
        Ok(Prepared {
            conversation: repaired.conversation,
            repaired: true,
            stats: repaired.stats,
        })
    }
}
