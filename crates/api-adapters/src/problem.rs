//! Maps domain failures onto HTTP responses with RFC 7807 bodies.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use domains::DomainError;

use crate::schemas::ProblemDetails;

/// Everything a handler can fail with: a domain-rule violation or a request
/// that never reached the core.
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    Validation(String),
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::Domain(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, title, detail) = match self {
            Self::Domain(DomainError::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                "Inbox Not Found",
                "The requested inbox does not exist.".to_string(),
            ),
            Self::Domain(error @ DomainError::InvalidSignature) => {
                (StatusCode::FORBIDDEN, "Invalid Credentials", error.to_string())
            }
            Self::Domain(error @ DomainError::InboxExpired) => {
                (StatusCode::GONE, "Inbox Expired", error.to_string())
            }
            Self::Domain(error @ DomainError::TopicChangeNotAllowed) => {
                (StatusCode::CONFLICT, "State Conflict", error.to_string())
            }
            Self::Domain(error @ DomainError::AnonymousMessagesNotAllowed) => {
                (StatusCode::FORBIDDEN, "Anonymity Forbidden", error.to_string())
            }
            Self::Domain(DomainError::Storage(error)) => {
                // Opaque internal failure: log the cause, report generically.
                tracing::error!(error = %error, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "An unexpected error occurred.".to_string(),
                )
            }
            Self::Validation(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Request Validation Failed",
                detail,
            ),
        };

        let problem = ProblemDetails::new(title, status.as_u16(), detail);
        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(problem),
        )
            .into_response()
    }
}
