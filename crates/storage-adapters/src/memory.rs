//! # MemoryInboxRepository
//!
//! DashMap-backed implementation of `InboxRepository`. Used by the test
//! suites and as a zero-infrastructure backend for local development. Keeps
//! the same ordering contracts as the Postgres adapter.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use domains::{Inbox, InboxRepository, Message};

#[derive(Default)]
pub struct MemoryInboxRepository {
    inboxes: DashMap<Uuid, Inbox>,
    messages: DashMap<Uuid, Vec<Message>>,
    next_message_id: AtomicI64,
}

impl MemoryInboxRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an inbox directly, bypassing the service. Test seams only.
    pub fn seed_inbox(&self, inbox: Inbox) {
        self.inboxes.insert(inbox.id, inbox);
    }
}

fn page<T>(items: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    items
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

#[async_trait]
impl InboxRepository for MemoryInboxRepository {
    async fn save_inbox(&self, inbox: &Inbox) -> anyhow::Result<()> {
        self.inboxes.insert(inbox.id, inbox.clone());
        Ok(())
    }

    async fn inbox_by_id(&self, id: Uuid) -> anyhow::Result<Option<Inbox>> {
        Ok(self.inboxes.get(&id).map(|entry| entry.value().clone()))
    }

    async fn inboxes_by_signature(
        &self,
        signature: &str,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Inbox>> {
        let mut owned: Vec<Inbox> = self
            .inboxes
            .iter()
            .filter(|entry| entry.owner_signature == signature)
            .map(|entry| entry.value().clone())
            .collect();
        // Topic descending, id ascending tiebreak; matches the SQL adapter.
        owned.sort_by(|a, b| b.topic.cmp(&a.topic).then(a.id.cmp(&b.id)));
        Ok(page(owned, limit, offset))
    }

    async fn add_message(&self, message: Message) -> anyhow::Result<Message> {
        let id = self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1;
        let persisted = Message {
            id: Some(id),
            ..message
        };
        self.messages
            .entry(persisted.inbox_id)
            .or_default()
            .push(persisted.clone());
        Ok(persisted)
    }

    async fn messages_for_inbox(
        &self,
        inbox_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Message>> {
        let mut owned: Vec<Message> = self
            .messages
            .get(&inbox_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(page(owned, limit, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn inbox(topic: &str, signature: &str) -> Inbox {
        Inbox::new(
            topic.to_string(),
            signature.to_string(),
            Utc::now() + Duration::days(1),
            true,
        )
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let repo = MemoryInboxRepository::new();
        let stored = inbox("Feedback", "alice!0123456789");
        repo.save_inbox(&stored).await.unwrap();

        let loaded = repo.inbox_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(loaded.topic, "Feedback");
        assert_eq!(loaded.owner_signature, "alice!0123456789");
    }

    #[tokio::test]
    async fn second_save_updates_the_topic() {
        let repo = MemoryInboxRepository::new();
        let mut stored = inbox("Feedback", "alice!0123456789");
        repo.save_inbox(&stored).await.unwrap();

        stored.topic = "Renamed".to_string();
        repo.save_inbox(&stored).await.unwrap();

        let loaded = repo.inbox_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(loaded.topic, "Renamed");
    }

    #[tokio::test]
    async fn missing_inbox_is_none() {
        let repo = MemoryInboxRepository::new();
        assert!(repo.inbox_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn message_ids_are_assigned_by_the_store() {
        let repo = MemoryInboxRepository::new();
        let stored = inbox("Feedback", "alice!0123456789");
        repo.save_inbox(&stored).await.unwrap();

        let first = repo
            .add_message(Message::new(stored.id, "first".to_string(), None))
            .await
            .unwrap();
        let second = repo
            .add_message(Message::new(stored.id, "second".to_string(), None))
            .await
            .unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn messages_come_back_newest_first() {
        let repo = MemoryInboxRepository::new();
        let stored = inbox("Feedback", "alice!0123456789");
        repo.save_inbox(&stored).await.unwrap();

        let mut older = Message::new(stored.id, "older".to_string(), None);
        older.created_at = Utc::now() - Duration::minutes(5);
        repo.add_message(older).await.unwrap();
        repo.add_message(Message::new(stored.id, "newer".to_string(), None))
            .await
            .unwrap();

        let messages = repo.messages_for_inbox(stored.id, 10, 0).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].body, "newer");
        assert_eq!(messages[1].body, "older");
    }

    #[tokio::test]
    async fn pagination_slices_with_limit_and_offset() {
        let repo = MemoryInboxRepository::new();
        let stored = inbox("Feedback", "alice!0123456789");
        repo.save_inbox(&stored).await.unwrap();

        for n in 0..5 {
            let mut message = Message::new(stored.id, format!("message {n}"), None);
            message.created_at = Utc::now() + Duration::seconds(n);
            repo.add_message(message).await.unwrap();
        }

        let second_page = repo.messages_for_inbox(stored.id, 2, 2).await.unwrap();
        assert_eq!(second_page.len(), 2);
        assert_eq!(second_page[0].body, "message 2");
        assert_eq!(second_page[1].body, "message 1");
    }

    #[tokio::test]
    async fn signature_query_filters_and_orders_by_topic_descending() {
        let repo = MemoryInboxRepository::new();
        repo.save_inbox(&inbox("Alpha", "alice!0123456789")).await.unwrap();
        repo.save_inbox(&inbox("Zulu", "alice!0123456789")).await.unwrap();
        repo.save_inbox(&inbox("Other", "bob!abcdef0123")).await.unwrap();

        let owned = repo
            .inboxes_by_signature("alice!0123456789", 10, 0)
            .await
            .unwrap();

        assert_eq!(owned.len(), 2);
        assert_eq!(owned[0].topic, "Zulu");
        assert_eq!(owned[1].topic, "Alpha");
    }
}
