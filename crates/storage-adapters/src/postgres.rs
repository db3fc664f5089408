//! # PgInboxRepository
//!
//! sqlx-backed Postgres implementation of `InboxRepository`. Maps between
//! the relational rows and the domain models; schema lives in `migrations/`.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use uuid::Uuid;

use domains::{Inbox, InboxRepository, Message};

pub struct PgInboxRepository {
    pool: PgPool,
}

impl PgInboxRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn inbox_from_row(row: &PgRow) -> anyhow::Result<Inbox> {
    Ok(Inbox {
        id: row.try_get("id")?,
        topic: row.try_get("topic")?,
        owner_signature: row.try_get("owner_signature")?,
        expires_at: row.try_get("expires_at")?,
        allow_anonymous: row.try_get("allow_anonymous")?,
    })
}

fn message_from_row(row: &PgRow) -> anyhow::Result<Message> {
    Ok(Message {
        id: row.try_get("id")?,
        inbox_id: row.try_get("inbox_id")?,
        body: row.try_get("body")?,
        created_at: row.try_get("created_at")?,
        signature: row.try_get("signature")?,
    })
}

#[async_trait]
impl InboxRepository for PgInboxRepository {
    /// Upsert keyed by id. The topic is the only mutable column.
    async fn save_inbox(&self, inbox: &Inbox) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO inboxes (id, topic, owner_signature, expires_at, allow_anonymous) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO UPDATE SET topic = EXCLUDED.topic",
        )
        .bind(inbox.id)
        .bind(&inbox.topic)
        .bind(&inbox.owner_signature)
        .bind(inbox.expires_at)
        .bind(inbox.allow_anonymous)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn inbox_by_id(&self, id: Uuid) -> anyhow::Result<Option<Inbox>> {
        let row = sqlx::query(
            "SELECT id, topic, owner_signature, expires_at, allow_anonymous \
             FROM inboxes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(inbox_from_row).transpose()
    }

    async fn inboxes_by_signature(
        &self,
        signature: &str,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Inbox>> {
        let rows = sqlx::query(
            "SELECT id, topic, owner_signature, expires_at, allow_anonymous \
             FROM inboxes WHERE owner_signature = $1 \
             ORDER BY topic DESC, id \
             LIMIT $2 OFFSET $3",
        )
        .bind(signature)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(inbox_from_row).collect()
    }

    /// The id comes back from the BIGSERIAL column; the returned message is
    /// the persisted copy.
    async fn add_message(&self, message: Message) -> anyhow::Result<Message> {
        let row = sqlx::query(
            "INSERT INTO messages (inbox_id, body, created_at, signature) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(message.inbox_id)
        .bind(&message.body)
        .bind(message.created_at)
        .bind(&message.signature)
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.try_get("id")?;
        tracing::debug!(inbox_id = %message.inbox_id, message_id = id, "stored message");
        Ok(Message {
            id: Some(id),
            ..message
        })
    }

    async fn messages_for_inbox(
        &self,
        inbox_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Message>> {
        let rows = sqlx::query(
            "SELECT id, inbox_id, body, created_at, signature \
             FROM messages WHERE inbox_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(inbox_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(message_from_row).collect()
    }
}
