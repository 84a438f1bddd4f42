//! Job feed endpoints.

use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::Response,
    routing::get,
};

use jobboard_core::JobId;
use jobboard_feed::{JobPost, NewJobPost};
use jobboard_pagination::Page;

use crate::app::dto::{CreateJobRequest, PageQuery};
use crate::app::errors::{feed_error, store_error};
use crate::app::services::AppServices;
use crate::context::UserContext;

pub fn router() -> Router {
    Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/mine", get(my_jobs))
        .route("/jobs/:id", get(get_job).delete(delete_job))
}

async fn list_jobs(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<JobPost>>, Response> {
    let page = services
        .feed
        .feed_page(&query.page_request())
        .await
        .map_err(store_error)?;
    Ok(Json(page))
}

async fn my_jobs(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<JobPost>>, Response> {
    let page = services
        .feed
        .my_posts_page(user.user_id(), &query.page_request())
        .await
        .map_err(store_error)?;
    Ok(Json(page))
}

async fn create_job(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    Json(body): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobPost>), Response> {
    let job = services
        .feed
        .publish(NewJobPost {
            author_id: user.user_id(),
            title: body.title,
            body: body.body,
            pay: body.pay,
        })
        .await
        .map_err(feed_error)?;
    Ok((StatusCode::CREATED, Json(job)))
}

async fn get_job(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> Result<Json<JobPost>, Response> {
    let job = services.feed.get(JobId::new(id)).await.map_err(feed_error)?;
    Ok(Json(job))
}

async fn delete_job(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Response> {
    services
        .feed
        .retract(user.user_id(), JobId::new(id))
        .await
        .map_err(feed_error)?;
    Ok(StatusCode::NO_CONTENT)
}
