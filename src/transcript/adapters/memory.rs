//! In-memory implementation of the `ConversationStore` port.
//!
//! Provides a simple, thread-safe storage collaborator for tests and for
//! embedding the core without a database.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::transcript::{
    domain::{Conversation, ConversationId},
    error::StoreError,
    ports::store::{ConversationStore, StoreResult},
};

/// In-memory implementation of [`ConversationStore`].
///
/// Thread-safe via internal [`RwLock`]. Stored conversations are returned by
/// value, so callers can never alter what the store holds.
///
/// # Example
///
/// ```
/// use turnstile::transcript::adapters::memory::InMemoryConversationStore;
/// use turnstile::transcript::domain::{Conversation, ConversationId};
///
/// let store = InMemoryConversationStore::new();
/// store
///     .insert(ConversationId::new(), Conversation::empty())
///     .expect("insert should succeed");
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryConversationStore {
    conversations: Arc<RwLock<HashMap<ConversationId, Conversation>>>,
}

impl InMemoryConversationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `conversation` under `id`, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the internal lock is poisoned.
    pub fn insert(&self, id: ConversationId, conversation: Conversation) -> StoreResult<()> {
        let mut guard = self
            .conversations
            .write()
            .map_err(|e| StoreError::connection(format!("lock poisoned: {e}")))?;
        guard.insert(id, conversation);
        Ok(())
    }

    /// Decodes a stored JSON record and stores it under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if the record is not a valid
    /// conversation, or [`StoreError::Connection`] if the lock is poisoned.
    pub fn insert_json(&self, id: ConversationId, record: &str) -> StoreResult<()> {
        let conversation: Conversation = serde_json::from_str(record)
            .map_err(|e| StoreError::serialization(e.to_string()))?;
        self.insert(id, conversation)
    }

    /// Returns the number of stored conversations.
    ///
    /// Returns `0` if the internal lock is poisoned, matching the fallback
    /// behaviour of an empty store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conversations
            .read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    /// Returns `true` if no conversations are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn load(&self, id: ConversationId) -> StoreResult<Conversation> {
        let guard = self
            .conversations
            .read()
            .map_err(|e| StoreError::connection(format!("lock poisoned: {e}")))?;

        guard.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }
}
