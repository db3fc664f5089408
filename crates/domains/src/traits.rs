//! # Core Traits (Ports)
//!
//! Any storage adapter must implement these traits to be used by the binary.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Inbox, Message};

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

/// Data persistence contract for inboxes and their messages.
///
/// Methods return `anyhow::Result`; infrastructure failures are opaque to the
/// domain and get wrapped into `DomainError::Storage` by the service layer.
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait InboxRepository: Send + Sync {
    /// Inserts the inbox, or updates it if the id already exists.
    /// The topic is the only field that is ever updated.
    async fn save_inbox(&self, inbox: &Inbox) -> anyhow::Result<()>;

    /// Retrieves an inbox by its unique identifier.
    async fn inbox_by_id(&self, id: Uuid) -> anyhow::Result<Option<Inbox>>;

    /// Retrieves inboxes owned by the given signature, ordered by topic
    /// descending with id as a deterministic tiebreak.
    async fn inboxes_by_signature(
        &self,
        signature: &str,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Inbox>>;

    /// Persists a message. The returned copy carries the storage-assigned id.
    async fn add_message(&self, message: Message) -> anyhow::Result<Message>;

    /// Retrieves messages for an inbox, newest-first, with pagination.
    async fn messages_for_inbox(
        &self,
        inbox_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Message>>;
}
