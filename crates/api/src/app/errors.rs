//! Error-to-response mapping.
//!
//! Domain failures map to 4xx with a stable machine-readable code; store
//! failures are logged and surfaced as an opaque 500. Malformed cursors never
//! reach this module: the pagination layer degrades them to a first page.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use jobboard_comments::CommentError;
use jobboard_core::{DomainError, StoreError};
use jobboard_feed::FeedError;
use jobboard_social::SocialError;

pub fn json_error(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(json!({ "error": code, "message": message }))).into_response()
}

pub fn domain_error(err: DomainError) -> Response {
    match &err {
        DomainError::Validation(_) => {
            json_error(StatusCode::BAD_REQUEST, "validation", &err.to_string())
        }
        DomainError::InvalidId(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_id", &err.to_string())
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Unauthorized => {
            json_error(StatusCode::FORBIDDEN, "unauthorized", "not allowed")
        }
    }
}

pub fn store_error(err: StoreError) -> Response {
    tracing::error!(%err, "store failure");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal",
        "internal error",
    )
}

pub fn feed_error(err: FeedError) -> Response {
    match err {
        FeedError::Domain(e) => domain_error(e),
        FeedError::Store(e) => store_error(e),
    }
}

pub fn comment_error(err: CommentError) -> Response {
    match err {
        CommentError::Domain(e) => domain_error(e),
        CommentError::Store(e) => store_error(e),
    }
}

pub fn social_error(err: SocialError) -> Response {
    match err {
        SocialError::Domain(e) => domain_error(e),
        SocialError::Store(e) => store_error(e),
    }
}
