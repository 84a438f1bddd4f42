//! Store seam for comments.

use std::collections::HashMap;

use async_trait::async_trait;

use jobboard_core::{CommentId, JobId, StoreError};
use jobboard_pagination::RangeQuery;

use crate::comment::{Comment, NewComment, ParentRef};

/// Persistence contract for comments.
///
/// `fetch_page` pages one axis at a time: `ParentRef::TopLevel` for the
/// parent axis of a job, `ParentRef::ChildOf(id)` for one parent's children.
/// It must honor the query's predicate and fetch order exactly and return at
/// most `query.fetch_limit()` rows, ordering ties by id.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn fetch_page(
        &self,
        job_id: JobId,
        parent: ParentRef,
        query: &RangeQuery,
    ) -> Result<Vec<Comment>, StoreError>;

    /// Live count of top-level comments under a job.
    async fn count_top_level(&self, job_id: JobId) -> Result<i64, StoreError>;

    /// Live child counts for a batch of parents; parents with no children
    /// may be absent from the map.
    async fn count_children(
        &self,
        parents: &[CommentId],
    ) -> Result<HashMap<CommentId, i64>, StoreError>;

    async fn insert(&self, new: NewComment) -> Result<Comment, StoreError>;

    async fn get(&self, id: CommentId) -> Result<Option<Comment>, StoreError>;

    /// Delete a comment; deleting a top-level comment removes its children
    /// as well. Returns whether anything was deleted.
    async fn delete(&self, id: CommentId) -> Result<bool, StoreError>;
}
