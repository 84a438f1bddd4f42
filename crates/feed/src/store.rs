//! Store seam for job posts.

use async_trait::async_trait;

use jobboard_core::{JobId, StoreError, UserId};
use jobboard_pagination::RangeQuery;

use crate::job::{JobPost, NewJobPost};

/// Which slice of the feed a page request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedScope {
    /// The global feed.
    Everyone,
    /// One author's posts ("my posts").
    Author(UserId),
}

/// Persistence contract for job posts.
///
/// `fetch_page` must honor the query's predicate and fetch order exactly and
/// return at most `query.fetch_limit()` rows, ordering ties by id. Implemented
/// over Postgres and in memory in `jobboard-infra`.
#[async_trait]
pub trait FeedStore: Send + Sync {
    async fn fetch_page(
        &self,
        scope: FeedScope,
        query: &RangeQuery,
    ) -> Result<Vec<JobPost>, StoreError>;

    async fn insert(&self, new: NewJobPost) -> Result<JobPost, StoreError>;

    async fn get(&self, id: JobId) -> Result<Option<JobPost>, StoreError>;

    async fn delete(&self, id: JobId) -> Result<bool, StoreError>;
}
