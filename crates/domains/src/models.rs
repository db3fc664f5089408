//! # Domain Models
//!
//! These structs represent the core entities of Rusty-Inbox: the Inbox
//! aggregate and the Message entity. The aggregate enforces expiration,
//! anonymity policy, topic-mutation guarding, and signature-based ownership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, Result};

/// An anonymous feedback inbox.
///
/// Messages are not held inside the aggregate; the repository is the source
/// of truth and rule checks receive the minimal evidence they need (e.g. a
/// `has_messages` flag for the topic-change rule).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inbox {
    pub id: Uuid,
    /// Short text label; mutable exactly once, while no replies exist.
    pub topic: String,
    /// Tripcode of the creator. The sole ownership credential; never changes.
    pub owner_signature: String,
    /// After this instant the inbox accepts no new messages.
    pub expires_at: DateTime<Utc>,
    /// When false, every reply must carry a signature.
    pub allow_anonymous: bool,
}

impl Inbox {
    /// Constructs a fresh inbox with a newly generated id.
    pub fn new(
        topic: String,
        owner_signature: String,
        expires_at: DateTime<Utc>,
        allow_anonymous: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic,
            owner_signature,
            expires_at,
            allow_anonymous,
        }
    }

    /// Whether the expiration instant has passed. Recomputed against the
    /// wall clock on every call.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Succeeds only on an exact, case-sensitive match with the owner
    /// signature.
    pub fn validate_ownership(&self, provided_signature: &str) -> Result<()> {
        if self.owner_signature != provided_signature {
            return Err(DomainError::InvalidSignature);
        }
        Ok(())
    }

    /// Replaces the topic. The caller supplies `has_messages` (typically by
    /// fetching at most one message) so the rule check stays cheap and
    /// decoupled from how messages are stored.
    pub fn change_topic(&mut self, new_topic: String, has_messages: bool) -> Result<()> {
        if has_messages {
            return Err(DomainError::TopicChangeNotAllowed);
        }
        self.topic = new_topic;
        Ok(())
    }

    /// Checks whether a reply with the given signature may be admitted.
    /// Expiration is checked first, regardless of the signature. No mutation;
    /// message construction and persistence happen in the application service.
    pub fn validate_new_message(&self, signature: Option<&str>) -> Result<()> {
        if self.is_expired() {
            return Err(DomainError::InboxExpired);
        }
        if !self.allow_anonymous && signature.is_none() {
            return Err(DomainError::AnonymousMessagesNotAllowed);
        }
        Ok(())
    }
}

/// A single reply within an inbox. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Assigned by the persistence layer; `None` until then.
    pub id: Option<i64>,
    pub inbox_id: Uuid,
    pub body: String,
    /// UTC timestamp set at admission time, never updated.
    pub created_at: DateTime<Utc>,
    /// Tripcode of the sender; `None` means anonymous.
    pub signature: Option<String>,
}

impl Message {
    /// Constructs a not-yet-persisted message stamped with the current time.
    pub fn new(inbox_id: Uuid, body: String, signature: Option<String>) -> Self {
        Self {
            id: None,
            inbox_id,
            body,
            created_at: Utc::now(),
            signature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn open_inbox() -> Inbox {
        Inbox::new(
            "General Topic".to_string(),
            "alice!0123456789".to_string(),
            Utc::now() + Duration::days(1),
            true,
        )
    }

    fn expired_inbox() -> Inbox {
        Inbox::new(
            "Old Topic".to_string(),
            "alice!0123456789".to_string(),
            Utc::now() - Duration::days(1),
            true,
        )
    }

    fn strict_inbox() -> Inbox {
        Inbox::new(
            "Strict Topic".to_string(),
            "alice!0123456789".to_string(),
            Utc::now() + Duration::days(1),
            false,
        )
    }

    #[test]
    fn is_expired_false_for_future_date() {
        assert!(!open_inbox().is_expired());
    }

    #[test]
    fn is_expired_true_for_past_date() {
        assert!(expired_inbox().is_expired());
    }

    #[test]
    fn is_expired_holds_across_the_boundary_instant() {
        let mut inbox = open_inbox();
        inbox.expires_at = Utc::now() - Duration::seconds(1);
        assert!(inbox.is_expired());
        inbox.expires_at = Utc::now() + Duration::seconds(1);
        assert!(!inbox.is_expired());
    }

    #[test]
    fn validate_ownership_accepts_the_owner_signature() {
        assert!(open_inbox().validate_ownership("alice!0123456789").is_ok());
    }

    #[test]
    fn validate_ownership_rejects_anything_else() {
        let inbox = open_inbox();
        assert!(matches!(
            inbox.validate_ownership("mallory!ffffffffff"),
            Err(DomainError::InvalidSignature)
        ));
        // Comparison is case-sensitive.
        assert!(matches!(
            inbox.validate_ownership("ALICE!0123456789"),
            Err(DomainError::InvalidSignature)
        ));
    }

    #[test]
    fn change_topic_succeeds_when_empty() {
        let mut inbox = open_inbox();
        inbox.change_topic("New Topic".to_string(), false).unwrap();
        assert_eq!(inbox.topic, "New Topic");
    }

    #[test]
    fn change_topic_fails_when_messages_exist() {
        let mut inbox = open_inbox();
        let result = inbox.change_topic("New Topic".to_string(), true);
        assert!(matches!(result, Err(DomainError::TopicChangeNotAllowed)));
        assert_eq!(inbox.topic, "General Topic");
    }

    #[test]
    fn validate_new_message_accepts_anonymous_when_allowed() {
        assert!(open_inbox().validate_new_message(None).is_ok());
    }

    #[test]
    fn validate_new_message_accepts_signed() {
        assert!(open_inbox().validate_new_message(Some("bob!abcdef0123")).is_ok());
    }

    #[test]
    fn validate_new_message_fails_when_expired_even_if_signed() {
        let result = expired_inbox().validate_new_message(Some("bob!abcdef0123"));
        assert!(matches!(result, Err(DomainError::InboxExpired)));
    }

    #[test]
    fn validate_new_message_fails_anonymous_on_strict_inbox() {
        let result = strict_inbox().validate_new_message(None);
        assert!(matches!(result, Err(DomainError::AnonymousMessagesNotAllowed)));
    }

    #[test]
    fn validate_new_message_accepts_signed_on_strict_inbox() {
        assert!(strict_inbox().validate_new_message(Some("bob!abcdef0123")).is_ok());
    }

    #[test]
    fn new_message_starts_unpersisted() {
        let inbox = open_inbox();
        let message = Message::new(inbox.id, "Hello".to_string(), None);
        assert!(message.id.is_none());
        assert_eq!(message.inbox_id, inbox.id);
        assert!(message.signature.is_none());
    }
}
