//! In-memory stores for tests and local development.
//!
//! These implement the exact ordering contract of the Postgres stores:
//! filter by the query's keyset predicate, sort by `(created_at, id)` in the
//! query's fetch order, truncate to `fetch_limit`. Ids come from an atomic
//! counter, so they are monotonic the way an auto-increment key is.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use jobboard_comments::{Comment, CommentStore, NewComment, ParentRef};
use jobboard_core::{CommentId, JobId, StoreError, UserId};
use jobboard_feed::{FeedScope, FeedStore, JobPost, NewJobPost};
use jobboard_pagination::RangeQuery;
use jobboard_social::SocialStore;

fn now_micros() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_micros(now.timestamp_micros()).unwrap_or(now)
}

fn window<T: Clone>(
    rows: impl Iterator<Item = T>,
    key: impl Fn(&T) -> (DateTime<Utc>, i64),
    query: &RangeQuery,
) -> Vec<T> {
    let mut rows: Vec<T> = rows
        .filter(|r| {
            let (created_at, id) = key(r);
            query.admits(created_at, id)
        })
        .collect();
    rows.sort_by_key(|r| key(r));
    if !query.fetch_ascending() {
        rows.reverse();
    }
    rows.truncate(query.fetch_limit() as usize);
    rows
}

pub struct InMemoryFeedStore {
    rows: Mutex<Vec<JobPost>>,
    next_id: AtomicI64,
}

impl InMemoryFeedStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl FeedStore for InMemoryFeedStore {
    async fn fetch_page(
        &self,
        scope: FeedScope,
        query: &RangeQuery,
    ) -> Result<Vec<JobPost>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(window(
            rows.iter()
                .filter(|r| match scope {
                    FeedScope::Everyone => true,
                    FeedScope::Author(author) => r.author_id == author,
                })
                .cloned(),
            |r| (r.created_at, r.id.as_i64()),
            query,
        ))
    }

    async fn insert(&self, new: NewJobPost) -> Result<JobPost, StoreError> {
        let job = JobPost {
            id: JobId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
            author_id: new.author_id,
            title: new.title,
            body: new.body,
            pay: new.pay,
            created_at: now_micros(),
        };
        self.rows.lock().unwrap().push(job.clone());
        Ok(job)
    }

    async fn get(&self, id: JobId) -> Result<Option<JobPost>, StoreError> {
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn delete(&self, id: JobId) -> Result<bool, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() != before)
    }
}

pub struct InMemoryCommentStore {
    rows: Mutex<Vec<Comment>>,
    next_id: AtomicI64,
}

impl InMemoryCommentStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl CommentStore for InMemoryCommentStore {
    async fn fetch_page(
        &self,
        job_id: JobId,
        parent: ParentRef,
        query: &RangeQuery,
    ) -> Result<Vec<Comment>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(window(
            rows.iter()
                .filter(|c| c.job_id == job_id && c.parent == parent)
                .cloned(),
            |c| (c.created_at, c.id.as_i64()),
            query,
        ))
    }

    async fn count_top_level(&self, job_id: JobId) -> Result<i64, StoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.job_id == job_id && c.parent.is_top_level())
            .count() as i64)
    }

    async fn count_children(
        &self,
        parents: &[CommentId],
    ) -> Result<HashMap<CommentId, i64>, StoreError> {
        let rows = self.rows.lock().unwrap();
        let mut counts = HashMap::new();
        for &parent in parents {
            let n = rows
                .iter()
                .filter(|c| c.parent == ParentRef::ChildOf(parent))
                .count() as i64;
            if n > 0 {
                counts.insert(parent, n);
            }
        }
        Ok(counts)
    }

    async fn insert(&self, new: NewComment) -> Result<Comment, StoreError> {
        let comment = Comment {
            id: CommentId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
            job_id: new.job_id,
            author_id: new.author_id,
            parent: new.parent,
            reply_to: new.reply_to,
            body: new.body,
            created_at: now_micros(),
        };
        self.rows.lock().unwrap().push(comment.clone());
        Ok(comment)
    }

    async fn get(&self, id: CommentId) -> Result<Option<Comment>, StoreError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn delete(&self, id: CommentId) -> Result<bool, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id && c.parent != ParentRef::ChildOf(id));
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct InMemorySocialStore {
    likes: Mutex<HashSet<(UserId, JobId)>>,
    follows: Mutex<HashSet<(UserId, UserId)>>,
}

impl InMemorySocialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SocialStore for InMemorySocialStore {
    async fn insert_like(&self, user: UserId, job: JobId) -> Result<bool, StoreError> {
        Ok(self.likes.lock().unwrap().insert((user, job)))
    }

    async fn delete_like(&self, user: UserId, job: JobId) -> Result<bool, StoreError> {
        Ok(self.likes.lock().unwrap().remove(&(user, job)))
    }

    async fn is_liked(&self, user: UserId, job: JobId) -> Result<bool, StoreError> {
        Ok(self.likes.lock().unwrap().contains(&(user, job)))
    }

    async fn like_count(&self, job: JobId) -> Result<i64, StoreError> {
        Ok(self
            .likes
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, j)| *j == job)
            .count() as i64)
    }

    async fn insert_follow(
        &self,
        follower: UserId,
        followee: UserId,
    ) -> Result<bool, StoreError> {
        Ok(self.follows.lock().unwrap().insert((follower, followee)))
    }

    async fn delete_follow(
        &self,
        follower: UserId,
        followee: UserId,
    ) -> Result<bool, StoreError> {
        Ok(self.follows.lock().unwrap().remove(&(follower, followee)))
    }

    async fn follower_count(&self, user: UserId) -> Result<i64, StoreError> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, followee)| *followee == user)
            .count() as i64)
    }

    async fn following_count(&self, user: UserId) -> Result<i64, StoreError> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|(follower, _)| *follower == user)
            .count() as i64)
    }
}
