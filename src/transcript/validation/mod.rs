//! Adjacency validation implementation.
//!
//! This module provides the default implementation of transcript validation,
//! including the individual rules and the validator service composing them.

pub mod rules;
pub mod service;

pub use service::AdjacencyValidator;

use crate::transcript::{
    domain::Conversation,
    ports::validator::{TranscriptValidator, ValidationReport},
};

/// Validates a conversation with the default [`AdjacencyValidator`].
///
/// # Examples
///
/// ```
/// use turnstile::transcript::domain::{ContentPart, Conversation, Role, Turn};
/// use turnstile::transcript::validation::validate;
///
/// let conversation = Conversation::new(vec![Turn::new(
///     Role::User,
///     vec![ContentPart::text("Hello")],
/// )]);
/// assert!(validate(&conversation).is_valid());
/// ```
#[must_use]
pub fn validate(conversation: &Conversation) -> ValidationReport {
    AdjacencyValidator::new().validate(conversation)
}
