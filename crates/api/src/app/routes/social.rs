//! Like and follow endpoints.

use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::Path,
    http::StatusCode,
    response::Response,
    routing::{get, post},
};

use jobboard_core::{JobId, UserId};
use jobboard_social::{FollowSummary, LikeSummary};

use crate::app::errors::{social_error, store_error};
use crate::app::services::AppServices;
use crate::context::UserContext;

pub fn router() -> Router {
    Router::new()
        .route("/jobs/:id/like", post(toggle_like).get(like_summary))
        .route("/users/:id/follow", post(follow).delete(unfollow))
        .route("/users/:id/follows", get(follow_summary))
}

async fn toggle_like(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<i64>,
) -> Result<Json<LikeSummary>, Response> {
    let summary = services
        .social
        .toggle_like(user.user_id(), JobId::new(id))
        .await
        .map_err(store_error)?;
    Ok(Json(summary))
}

async fn like_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<i64>,
) -> Result<Json<LikeSummary>, Response> {
    let summary = services
        .social
        .like_summary(user.user_id(), JobId::new(id))
        .await
        .map_err(store_error)?;
    Ok(Json(summary))
}

async fn follow(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Response> {
    services
        .social
        .follow(user.user_id(), UserId::new(id))
        .await
        .map_err(social_error)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn unfollow(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Response> {
    services
        .social
        .unfollow(user.user_id(), UserId::new(id))
        .await
        .map_err(social_error)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn follow_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> Result<Json<FollowSummary>, Response> {
    let summary = services
        .social
        .follow_summary(UserId::new(id))
        .await
        .map_err(store_error)?;
    Ok(Json(summary))
}
