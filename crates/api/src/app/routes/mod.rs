//! Route registration.

pub mod comments;
pub mod feed;
pub mod social;

use axum::Router;

/// All authenticated routes, merged into one router.
pub fn router() -> Router {
    Router::new()
        .merge(feed::router())
        .merge(comments::router())
        .merge(social::router())
}

pub async fn health() -> &'static str {
    "ok"
}
