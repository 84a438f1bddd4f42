//! Social service: like toggles and follow edges.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use jobboard_core::{DomainError, JobId, StoreError, UserId};

use crate::store::SocialStore;

#[derive(Debug, Error)]
pub enum SocialError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Like state of one job for one viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeSummary {
    pub liked: bool,
    pub like_count: i64,
}

/// Follow counts for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FollowSummary {
    pub followers: i64,
    pub following: i64,
}

#[derive(Clone)]
pub struct SocialService {
    store: Arc<dyn SocialStore>,
}

impl SocialService {
    pub fn new(store: Arc<dyn SocialStore>) -> Self {
        Self { store }
    }

    /// Flip the viewer's like on a job and report the resulting state.
    pub async fn toggle_like(&self, user: UserId, job: JobId) -> Result<LikeSummary, StoreError> {
        let liked = if self.store.is_liked(user, job).await? {
            self.store.delete_like(user, job).await?;
            false
        } else {
            self.store.insert_like(user, job).await?;
            true
        };
        let like_count = self.store.like_count(job).await?;
        Ok(LikeSummary { liked, like_count })
    }

    pub async fn like_summary(&self, user: UserId, job: JobId) -> Result<LikeSummary, StoreError> {
        Ok(LikeSummary {
            liked: self.store.is_liked(user, job).await?,
            like_count: self.store.like_count(job).await?,
        })
    }

    pub async fn follow(&self, follower: UserId, followee: UserId) -> Result<(), SocialError> {
        if follower == followee {
            return Err(DomainError::validation("cannot follow yourself").into());
        }
        self.store.insert_follow(follower, followee).await?;
        Ok(())
    }

    pub async fn unfollow(&self, follower: UserId, followee: UserId) -> Result<(), SocialError> {
        self.store.delete_follow(follower, followee).await?;
        Ok(())
    }

    pub async fn follow_summary(&self, user: UserId) -> Result<FollowSummary, StoreError> {
        Ok(FollowSummary {
            followers: self.store.follower_count(user).await?,
            following: self.store.following_count(user).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FixtureStore {
        likes: Mutex<HashSet<(i64, i64)>>,
        follows: Mutex<HashSet<(i64, i64)>>,
    }

    #[async_trait]
    impl SocialStore for FixtureStore {
        async fn insert_like(&self, user: UserId, job: JobId) -> Result<bool, StoreError> {
            Ok(self.likes.lock().unwrap().insert((user.as_i64(), job.as_i64())))
        }

        async fn delete_like(&self, user: UserId, job: JobId) -> Result<bool, StoreError> {
            Ok(self.likes.lock().unwrap().remove(&(user.as_i64(), job.as_i64())))
        }

        async fn is_liked(&self, user: UserId, job: JobId) -> Result<bool, StoreError> {
            Ok(self.likes.lock().unwrap().contains(&(user.as_i64(), job.as_i64())))
        }

        async fn like_count(&self, job: JobId) -> Result<i64, StoreError> {
            Ok(self
                .likes
                .lock()
                .unwrap()
                .iter()
                .filter(|(_, j)| *j == job.as_i64())
                .count() as i64)
        }

        async fn insert_follow(
            &self,
            follower: UserId,
            followee: UserId,
        ) -> Result<bool, StoreError> {
            Ok(self
                .follows
                .lock()
                .unwrap()
                .insert((follower.as_i64(), followee.as_i64())))
        }

        async fn delete_follow(
            &self,
            follower: UserId,
            followee: UserId,
        ) -> Result<bool, StoreError> {
            Ok(self
                .follows
                .lock()
                .unwrap()
                .remove(&(follower.as_i64(), followee.as_i64())))
        }

        async fn follower_count(&self, user: UserId) -> Result<i64, StoreError> {
            Ok(self
                .follows
                .lock()
                .unwrap()
                .iter()
                .filter(|(_, f)| *f == user.as_i64())
                .count() as i64)
        }

        async fn following_count(&self, user: UserId) -> Result<i64, StoreError> {
            Ok(self
                .follows
                .lock()
                .unwrap()
                .iter()
                .filter(|(f, _)| *f == user.as_i64())
                .count() as i64)
        }
    }

    fn service() -> SocialService {
        SocialService::new(Arc::new(FixtureStore::default()))
    }

    #[tokio::test]
    async fn toggle_like_flips_state_and_count() {
        let svc = service();
        let user = UserId::new(1);
        let job = JobId::new(10);

        let on = svc.toggle_like(user, job).await.unwrap();
        assert_eq!(on, LikeSummary { liked: true, like_count: 1 });

        let off = svc.toggle_like(user, job).await.unwrap();
        assert_eq!(off, LikeSummary { liked: false, like_count: 0 });
    }

    #[tokio::test]
    async fn like_count_aggregates_across_users() {
        let svc = service();
        let job = JobId::new(10);
        svc.toggle_like(UserId::new(1), job).await.unwrap();
        svc.toggle_like(UserId::new(2), job).await.unwrap();

        let summary = svc.like_summary(UserId::new(3), job).await.unwrap();
        assert_eq!(summary, LikeSummary { liked: false, like_count: 2 });
    }

    #[tokio::test]
    async fn self_follow_is_rejected() {
        let svc = service();
        let err = svc.follow(UserId::new(1), UserId::new(1)).await.unwrap_err();
        assert!(matches!(err, SocialError::Domain(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn follow_counts_both_directions() {
        let svc = service();
        svc.follow(UserId::new(1), UserId::new(2)).await.unwrap();
        svc.follow(UserId::new(3), UserId::new(2)).await.unwrap();
        svc.follow(UserId::new(2), UserId::new(1)).await.unwrap();

        let two = svc.follow_summary(UserId::new(2)).await.unwrap();
        assert_eq!(two, FollowSummary { followers: 2, following: 1 });

        svc.unfollow(UserId::new(3), UserId::new(2)).await.unwrap();
        let two = svc.follow_summary(UserId::new(2)).await.unwrap();
        assert_eq!(two, FollowSummary { followers: 1, following: 1 });
    }
}
