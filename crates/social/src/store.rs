//! Store seam for likes and follows.

use async_trait::async_trait;

use jobboard_core::{JobId, StoreError, UserId};

/// Persistence contract for the social edges.
///
/// Insertions are idempotent: inserting an existing edge returns `false`
/// instead of erroring, deletions return whether an edge was removed.
#[async_trait]
pub trait SocialStore: Send + Sync {
    async fn insert_like(&self, user: UserId, job: JobId) -> Result<bool, StoreError>;
    async fn delete_like(&self, user: UserId, job: JobId) -> Result<bool, StoreError>;
    async fn is_liked(&self, user: UserId, job: JobId) -> Result<bool, StoreError>;
    async fn like_count(&self, job: JobId) -> Result<i64, StoreError>;

    async fn insert_follow(&self, follower: UserId, followee: UserId)
    -> Result<bool, StoreError>;
    async fn delete_follow(&self, follower: UserId, followee: UserId)
    -> Result<bool, StoreError>;
    async fn follower_count(&self, user: UserId) -> Result<i64, StoreError>;
    async fn following_count(&self, user: UserId) -> Result<i64, StoreError>;
}
