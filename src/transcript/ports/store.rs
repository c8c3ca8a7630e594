//! Storage collaborator port.
//!
//! Defines the read-only interface through which stored conversations reach
//! the core. Writing back is the storage collaborator's own concern; the core
//! never persists anything.

use crate::transcript::{
    domain::{Conversation, ConversationId},
    error::StoreError,
};
use async_trait::async_trait;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Port for loading stored conversations.
///
/// # Implementation Notes
///
/// Implementations must:
/// - Return turns in their stored chronological order
/// - Decode into the [`Conversation`] shape without restructuring turns
/// - Handle concurrent access safely
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Loads the conversation stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if nothing is stored under `id`, or
    /// another [`StoreError`] if the store fails.
    async fn load(&self, id: ConversationId) -> StoreResult<Conversation>;
}
