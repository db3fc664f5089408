//! Request and response bodies for the inbox API, plus the boundary
//! validation the core assumes has already happened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domains::{Inbox, Message};

/// Maximum length for an inbox topic in characters.
pub const MAX_TOPIC_LENGTH: usize = 200;

/// Maximum length for a username in characters.
pub const MAX_USERNAME_LENGTH: usize = 64;

/// Maximum length for a secret in characters.
pub const MAX_SECRET_LENGTH: usize = 128;

/// Maximum length for a message body in characters.
pub const MAX_BODY_LENGTH: usize = 4_000;

/// Upper bound for `page_size`.
pub const MAX_PAGE_SIZE: u32 = 100;

const DEFAULT_PAGE_SIZE: u32 = 20;

fn check_text(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if value.chars().count() > max {
        return Err(format!("{field} must be at most {max} characters"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInboxRequest {
    pub topic: String,
    pub username: String,
    pub secret: String,
    pub expires_at: DateTime<Utc>,
    pub allow_anonymous: bool,
}

impl CreateInboxRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_text("topic", &self.topic, MAX_TOPIC_LENGTH)?;
        check_text("username", &self.username, MAX_USERNAME_LENGTH)?;
        check_text("secret", &self.secret, MAX_SECRET_LENGTH)?;
        if self.expires_at <= Utc::now() {
            return Err("expires_at must be in the future".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyRequest {
    pub body: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
}

impl ReplyRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_text("body", &self.body, MAX_BODY_LENGTH)?;
        match (&self.username, &self.secret) {
            (Some(username), Some(secret)) => {
                check_text("username", username, MAX_USERNAME_LENGTH)?;
                check_text("secret", secret, MAX_SECRET_LENGTH)?;
            }
            (None, None) => {}
            _ => return Err("username and secret must be provided together".to_string()),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeTopicRequest {
    pub new_topic: String,
    pub username: String,
    pub secret: String,
}

impl ChangeTopicRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_text("new_topic", &self.new_topic, MAX_TOPIC_LENGTH)?;
        check_text("username", &self.username, MAX_USERNAME_LENGTH)?;
        check_text("secret", &self.secret, MAX_SECRET_LENGTH)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaginationQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl PaginationQuery {
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be at least 1".to_string());
        }
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            return Err(format!("page_size must be between 1 and {MAX_PAGE_SIZE}"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedInboxResponse {
    pub id: Uuid,
    pub signature: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxResponse {
    pub id: Uuid,
    pub topic: String,
    pub owner_signature: String,
    pub expires_at: DateTime<Utc>,
    pub allow_anonymous: bool,
}

impl From<Inbox> for InboxResponse {
    fn from(inbox: Inbox) -> Self {
        Self {
            id: inbox.id,
            topic: inbox.topic,
            owner_signature: inbox.owner_signature,
            expires_at: inbox.expires_at,
            allow_anonymous: inbox.allow_anonymous,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: Option<i64>,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub signature: Option<String>,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            body: message.body,
            created_at: message.created_at,
            signature: message.signature,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<MessageResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxesResponse {
    pub inboxes: Vec<InboxResponse>,
}

/// RFC 7807 problem document; the uniform error body of this API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    pub fn new(title: impl Into<String>, status: u16, detail: impl Into<String>) -> Self {
        Self {
            problem_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: detail.into(),
            instance: None,
        }
    }
}
