//! # InboxService
//!
//! Coordinates the repository and the Inbox aggregate to implement the five
//! use cases. Each call is one independent unit of work; every read
//! re-fetches from the repository, so expiry and ownership checks observe
//! the latest persisted state at call time.
//!
//! Known race window: the has-messages check in `change_topic` and a
//! concurrent `reply_to_inbox` on the same inbox can both observe "no
//! messages". This mirrors the reference behavior and is accepted; see
//! DESIGN.md.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use domains::{DomainError, Inbox, InboxRepository, Message, Result};

use crate::tripcode::TripcodeGenerator;

/// A 1-based page request. The boundary layer guarantees `page >= 1` and
/// `1 <= page_size <= 100` before it reaches the core.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1).max(0) * i64::from(self.page_size)
    }
}

/// Application service for the inbox use cases.
///
/// Domain-rule failures propagate uncaught to the boundary layer; the service
/// performs no retries and no partial-failure recovery.
pub struct InboxService {
    repository: Arc<dyn InboxRepository>,
    tripcodes: TripcodeGenerator,
}

impl InboxService {
    pub fn new(repository: Arc<dyn InboxRepository>, tripcodes: TripcodeGenerator) -> Self {
        Self {
            repository,
            tripcodes,
        }
    }

    /// Creates an inbox and returns its id together with the owner signature.
    ///
    /// `expires_at` is validated as strictly future by the boundary layer
    /// before it reaches this operation.
    pub async fn create_inbox(
        &self,
        topic: String,
        username: &str,
        secret: &str,
        expires_at: DateTime<Utc>,
        allow_anonymous: bool,
    ) -> Result<(Uuid, String)> {
        let signature = self.tripcodes.generate(username, secret);
        let inbox = Inbox::new(topic, signature.clone(), expires_at, allow_anonymous);
        self.repository.save_inbox(&inbox).await?;
        tracing::info!(inbox_id = %inbox.id, allow_anonymous, "created inbox");
        Ok((inbox.id, signature))
    }

    /// Public metadata lookup. Intentionally no ownership check: anyone
    /// holding the id can view topic, expiry, and policy, but not messages.
    pub async fn inbox_metadata(&self, inbox_id: Uuid) -> Result<Inbox> {
        self.load(inbox_id).await
    }

    /// Admits a reply. The sender signature is computed only when both
    /// credentials are present; the boundary enforces the both-or-neither
    /// pairing as a request-shape constraint.
    pub async fn reply_to_inbox(
        &self,
        inbox_id: Uuid,
        body: String,
        username: Option<&str>,
        secret: Option<&str>,
    ) -> Result<()> {
        let inbox = self.load(inbox_id).await?;

        let sender_signature = match (username, secret) {
            (Some(username), Some(secret)) => Some(self.tripcodes.generate(username, secret)),
            _ => None,
        };

        inbox.validate_new_message(sender_signature.as_deref())?;

        let message = Message::new(inbox_id, body, sender_signature);
        self.repository.add_message(message).await?;
        tracing::debug!(inbox_id = %inbox_id, "admitted reply");
        Ok(())
    }

    /// Renames the inbox topic, owner-only, and only while no reply exists.
    /// Existence of a reply is established by fetching at most one message.
    pub async fn change_topic(
        &self,
        inbox_id: Uuid,
        new_topic: String,
        username: &str,
        secret: &str,
    ) -> Result<Inbox> {
        let mut inbox = self.load(inbox_id).await?;

        let provided = self.tripcodes.generate(username, secret);
        inbox.validate_ownership(&provided)?;

        let has_messages = !self
            .repository
            .messages_for_inbox(inbox_id, 1, 0)
            .await?
            .is_empty();
        inbox.change_topic(new_topic, has_messages)?;

        self.repository.save_inbox(&inbox).await?;
        tracing::info!(inbox_id = %inbox.id, "changed inbox topic");
        Ok(inbox)
    }

    /// Returns one page of messages, newest-first. Owner-only.
    pub async fn messages(
        &self,
        inbox_id: Uuid,
        username: &str,
        secret: &str,
        page: PageRequest,
    ) -> Result<Vec<Message>> {
        let inbox = self.load(inbox_id).await?;

        let provided = self.tripcodes.generate(username, secret);
        inbox.validate_ownership(&provided)?;

        let messages = self
            .repository
            .messages_for_inbox(inbox_id, page.limit(), page.offset())
            .await?;
        Ok(messages)
    }

    /// Returns one page of inboxes owned by the given credentials. No inbox
    /// lookup needed; the computed signature is the repository query key.
    pub async fn owner_inboxes(
        &self,
        username: &str,
        secret: &str,
        page: PageRequest,
    ) -> Result<Vec<Inbox>> {
        let signature = self.tripcodes.generate(username, secret);
        let inboxes = self
            .repository
            .inboxes_by_signature(&signature, page.limit(), page.offset())
            .await?;
        Ok(inboxes)
    }

    async fn load(&self, inbox_id: Uuid) -> Result<Inbox> {
        self.repository
            .inbox_by_id(inbox_id)
            .await?
            .ok_or(DomainError::NotFound(inbox_id))
    }
}
