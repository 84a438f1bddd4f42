//! Comment tree endpoints.

use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::Response,
    routing::{delete, get},
};

use jobboard_comments::{ChildSlice, Comment, NewComment, ParentCommentView, ParentRef};
use jobboard_core::{CommentId, JobId};
use jobboard_pagination::Page;

use crate::app::dto::{CreateCommentRequest, PageQuery};
use crate::app::errors::{comment_error, store_error};
use crate::app::services::AppServices;
use crate::context::UserContext;

pub fn router() -> Router {
    Router::new()
        .route(
            "/jobs/:id/comments",
            get(list_comments).post(create_comment),
        )
        .route("/comments/:id/children", get(list_children))
        .route("/comments/:id", delete(delete_comment))
}

/// One page of top-level comments with inline child slices.
///
/// The subject id comes in as text on purpose: an unparseable id is "no
/// subject" and yields an empty page, same as a job with no comments.
async fn list_comments(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<ParentCommentView>>, Response> {
    let job_id = id.parse::<i64>().ok().map(JobId::new);
    let page = services
        .comments
        .parent_page(job_id, &query.page_request(), query.child_page_size)
        .await
        .map_err(store_error)?;
    Ok(Json(page))
}

async fn list_children(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ChildSlice>, Response> {
    let slice = services
        .comments
        .more_children(CommentId::new(id), &query.page_request())
        .await
        .map_err(store_error)?;
    Ok(Json(slice))
}

async fn create_comment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<i64>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), Response> {
    let comment = services
        .comments
        .post(NewComment {
            job_id: JobId::new(id),
            author_id: user.user_id(),
            parent: ParentRef::from(body.parent_id.unwrap_or(0)),
            reply_to: None,
            body: body.body,
        })
        .await
        .map_err(comment_error)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

async fn delete_comment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Response> {
    services
        .comments
        .remove(user.user_id(), CommentId::new(id))
        .await
        .map_err(comment_error)?;
    Ok(StatusCode::NO_CONTENT)
}
