//! # DomainError
//!
//! Centralized error handling for the Rusty-Inbox ecosystem.
//! Every business-rule failure surfaces as a distinct variant so the API
//! layer can map each one to its own response status.

use thiserror::Error;
use uuid::Uuid;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// The referenced inbox does not exist.
    #[error("inbox not found with ID {0}")]
    NotFound(Uuid),

    /// The provided signature does not match the inbox owner.
    #[error("provided signature does not match the inbox owner")]
    InvalidSignature,

    /// A reply was admitted after the inbox's expiration instant.
    #[error("inbox has expired and accepts no new messages")]
    InboxExpired,

    /// A rename was attempted after at least one reply exists.
    #[error("topic can no longer be changed: inbox already has replies")]
    TopicChangeNotAllowed,

    /// An unsigned reply was sent to an inbox that requires signatures.
    #[error("this inbox does not accept anonymous messages")]
    AnonymousMessagesNotAllowed,

    /// Infrastructure failure (e.g., DB down). Reported generically,
    /// never retried by the core.
    #[error("storage error")]
    Storage(#[from] anyhow::Error),
}

/// A specialized Result type for Rusty-Inbox domain logic.
pub type Result<T> = std::result::Result<T, DomainError>;
