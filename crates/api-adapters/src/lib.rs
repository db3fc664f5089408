//! # api-adapters
//!
//! The web routing and orchestration layer for Rusty-Inbox.

pub mod schemas;

#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod problem;

#[cfg(feature = "web-axum")]
pub use handlers::AppState;

#[cfg(feature = "web-axum")]
use axum::routing::{get, patch, post};
#[cfg(feature = "web-axum")]
use axum::Router;

/// Builds the inbox API router.
///
/// # Developer Note
/// The router is unprefixed so the binary can mount it under different paths
/// if needed (e.g., /api/v1/).
#[cfg(feature = "web-axum")]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/inboxes",
            post(handlers::create_inbox).get(handlers::search_inboxes),
        )
        .route("/inboxes/{inbox_id}", get(handlers::inbox_metadata))
        .route(
            "/inboxes/{inbox_id}/messages",
            post(handlers::reply_to_inbox).get(handlers::inbox_messages),
        )
        .route("/inboxes/{inbox_id}/topic", patch(handlers::change_topic))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
