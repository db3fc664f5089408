//! # api-adapters Handlers
//!
//! This module coordinates the flow between HTTP requests and the
//! application service. Request-shape validation happens here; everything
//! past this point assumes already-validated input.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use uuid::Uuid;

use services::{InboxService, PageRequest};

use crate::problem::ApiError;
use crate::schemas::{
    ChangeTopicRequest, CreateInboxRequest, CreatedInboxResponse, InboxResponse, InboxesResponse,
    MessageResponse, MessagesResponse, PaginationQuery, ReplyRequest,
};

/// State shared across all workers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<InboxService>,
}

/// Pulls the owner credentials from the `x-username` / `x-secret` headers
/// used by the read endpoints.
fn owner_credentials(headers: &HeaderMap) -> Result<(String, String), ApiError> {
    let header = |name: &str| -> Result<String, ApiError> {
        let value = headers
            .get(name)
            .ok_or_else(|| ApiError::Validation(format!("{name} header is required")))?;
        let value = value
            .to_str()
            .map_err(|_| ApiError::Validation(format!("{name} header must be valid UTF-8")))?;
        if value.is_empty() {
            return Err(ApiError::Validation(format!("{name} header must not be empty")));
        }
        Ok(value.to_string())
    };
    Ok((header("x-username")?, header("x-secret")?))
}

fn page_request(query: PaginationQuery) -> Result<PageRequest, ApiError> {
    query.validate().map_err(ApiError::Validation)?;
    Ok(PageRequest::new(query.page, query.page_size))
}

/// POST /inboxes
pub async fn create_inbox(
    State(state): State<AppState>,
    Json(request): Json<CreateInboxRequest>,
) -> Result<(StatusCode, Json<CreatedInboxResponse>), ApiError> {
    request.validate().map_err(ApiError::Validation)?;

    let (id, signature) = state
        .service
        .create_inbox(
            request.topic,
            &request.username,
            &request.secret,
            request.expires_at,
            request.allow_anonymous,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedInboxResponse { id, signature })))
}

/// GET /inboxes/{inbox_id}. Public metadata, intentionally no credentials.
pub async fn inbox_metadata(
    State(state): State<AppState>,
    Path(inbox_id): Path<Uuid>,
) -> Result<Json<InboxResponse>, ApiError> {
    let inbox = state.service.inbox_metadata(inbox_id).await?;
    Ok(Json(inbox.into()))
}

/// POST /inboxes/{inbox_id}/messages
pub async fn reply_to_inbox(
    State(state): State<AppState>,
    Path(inbox_id): Path<Uuid>,
    Json(request): Json<ReplyRequest>,
) -> Result<StatusCode, ApiError> {
    request.validate().map_err(ApiError::Validation)?;

    state
        .service
        .reply_to_inbox(
            inbox_id,
            request.body,
            request.username.as_deref(),
            request.secret.as_deref(),
        )
        .await?;

    Ok(StatusCode::CREATED)
}

/// PATCH /inboxes/{inbox_id}/topic
pub async fn change_topic(
    State(state): State<AppState>,
    Path(inbox_id): Path<Uuid>,
    Json(request): Json<ChangeTopicRequest>,
) -> Result<Json<InboxResponse>, ApiError> {
    request.validate().map_err(ApiError::Validation)?;

    let inbox = state
        .service
        .change_topic(inbox_id, request.new_topic, &request.username, &request.secret)
        .await?;

    Ok(Json(inbox.into()))
}

/// GET /inboxes/{inbox_id}/messages. Owner-only, newest-first.
pub async fn inbox_messages(
    State(state): State<AppState>,
    Path(inbox_id): Path<Uuid>,
    Query(query): Query<PaginationQuery>,
    headers: HeaderMap,
) -> Result<Json<MessagesResponse>, ApiError> {
    let page = page_request(query)?;
    let (username, secret) = owner_credentials(&headers)?;

    let messages = state
        .service
        .messages(inbox_id, &username, &secret, page)
        .await?;

    Ok(Json(MessagesResponse {
        messages: messages.into_iter().map(MessageResponse::from).collect(),
    }))
}

/// GET /inboxes. All inboxes belonging to the supplied credentials.
pub async fn search_inboxes(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
    headers: HeaderMap,
) -> Result<Json<InboxesResponse>, ApiError> {
    let page = page_request(query)?;
    let (username, secret) = owner_credentials(&headers)?;

    let inboxes = state.service.owner_inboxes(&username, &secret, page).await?;

    Ok(Json(InboxesResponse {
        inboxes: inboxes.into_iter().map(InboxResponse::from).collect(),
    }))
}
