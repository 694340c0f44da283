//! Error types for the order repository.

use thiserror::Error;

/// Errors that can occur while talking to the repository actor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RepositoryError {
    /// The actor's channel is closed; the system is shutting down.
    #[error("Repository closed")]
    ActorClosed,

    /// The actor dropped the response channel without answering.
    #[error("Repository dropped response channel")]
    ActorDropped,

    /// The positional index does not name an entry in the collection.
    #[error("No order at index {0}")]
    IndexOutOfRange(usize),
}
