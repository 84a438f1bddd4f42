//! Feed service: bidirectional pagination over job posts plus CRUD glue.

use std::sync::Arc;

use thiserror::Error;

use jobboard_core::{DomainError, JobId, StoreError, UserId};
use jobboard_pagination::{Page, PageLimits, PageRequest, assemble};

use crate::job::{JobPost, NewJobPost};
use crate::store::{FeedScope, FeedStore};

/// Feed-level failure: a domain rule or the store.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Stateless service over a [`FeedStore`].
///
/// Every call is an independent unit of work; pages are point-in-time
/// snapshots of whatever the store returned (read-committed is enough).
#[derive(Clone)]
pub struct FeedService {
    store: Arc<dyn FeedStore>,
}

impl FeedService {
    pub fn new(store: Arc<dyn FeedStore>) -> Self {
        Self { store }
    }

    /// One page of the global feed, newest first.
    pub async fn feed_page(&self, request: &PageRequest) -> Result<Page<JobPost>, StoreError> {
        self.page(FeedScope::Everyone, request).await
    }

    /// One page of a single author's posts, newest first.
    pub async fn my_posts_page(
        &self,
        author: UserId,
        request: &PageRequest,
    ) -> Result<Page<JobPost>, StoreError> {
        self.page(FeedScope::Author(author), request).await
    }

    async fn page(
        &self,
        scope: FeedScope,
        request: &PageRequest,
    ) -> Result<Page<JobPost>, StoreError> {
        let query = request.range_query(PageLimits::FEED);
        let rows = self.store.fetch_page(scope, &query).await?;
        Ok(assemble(&query, rows))
    }

    pub async fn publish(&self, new: NewJobPost) -> Result<JobPost, FeedError> {
        if new.title.trim().is_empty() {
            return Err(DomainError::validation("job title must not be empty").into());
        }
        if new.body.trim().is_empty() {
            return Err(DomainError::validation("job body must not be empty").into());
        }
        Ok(self.store.insert(new).await?)
    }

    pub async fn get(&self, id: JobId) -> Result<JobPost, FeedError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found().into())
    }

    /// Remove a post; only its author may do so.
    pub async fn retract(&self, actor: UserId, id: JobId) -> Result<(), FeedError> {
        let job = self.get(id).await?;
        if job.author_id != actor {
            return Err(DomainError::Unauthorized.into());
        }
        self.store.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use jobboard_pagination::PageItem;
    use std::sync::Mutex;

    /// Vec-backed fixture store with monotonic ids and fixed timestamps.
    #[derive(Default)]
    struct FixtureStore {
        rows: Mutex<Vec<JobPost>>,
        next_id: Mutex<i64>,
        clock: Mutex<i64>,
    }

    impl FixtureStore {
        fn seeded(posts: &[(i64, i64, i64)]) -> Self {
            // (id, author, created_at_micros)
            let rows = posts
                .iter()
                .map(|&(id, author, micros)| JobPost {
                    id: JobId::new(id),
                    author_id: UserId::new(author),
                    title: format!("job {id}"),
                    body: "body".into(),
                    pay: None,
                    created_at: DateTime::from_timestamp_micros(micros).unwrap(),
                })
                .collect::<Vec<_>>();
            let max_id = rows.iter().map(|r| r.id.as_i64()).max().unwrap_or(0);
            Self {
                rows: Mutex::new(rows),
                next_id: Mutex::new(max_id + 1),
                clock: Mutex::new(1_000_000),
            }
        }
    }

    #[async_trait]
    impl FeedStore for FixtureStore {
        async fn fetch_page(
            &self,
            scope: FeedScope,
            query: &jobboard_pagination::RangeQuery,
        ) -> Result<Vec<JobPost>, StoreError> {
            let mut rows: Vec<JobPost> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| match scope {
                    FeedScope::Everyone => true,
                    FeedScope::Author(a) => r.author_id == a,
                })
                .filter(|r| query.admits(r.created_at, r.id.as_i64()))
                .cloned()
                .collect();
            rows.sort_by_key(|r| (r.created_at, r.id.as_i64()));
            if !query.fetch_ascending() {
                rows.reverse();
            }
            rows.truncate(query.fetch_limit() as usize);
            Ok(rows)
        }

        async fn insert(&self, new: NewJobPost) -> Result<JobPost, StoreError> {
            let mut next_id = self.next_id.lock().unwrap();
            let mut clock = self.clock.lock().unwrap();
            *clock += 1;
            let job = JobPost {
                id: JobId::new(*next_id),
                author_id: new.author_id,
                title: new.title,
                body: new.body,
                pay: new.pay,
                created_at: DateTime::from_timestamp_micros(*clock).unwrap(),
            };
            *next_id += 1;
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

    fn service(store: FixtureStore) -> FeedService {
        FeedService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn first_page_is_newest_first() {
        let svc = service(FixtureStore::seeded(&[
            (10, 1, 1_000),
            (20, 2, 2_000),
            (30, 1, 3_000),
        ]));

        let page = svc.feed_page(&PageRequest::first_page(2)).await.unwrap();
        let ids: Vec<i64> = page.records.iter().map(|r| r.id.as_i64()).collect();
        assert_eq!(ids, vec![30, 20]);
        assert!(page.has_more_history);
        assert!(!page.has_more_new);
    }

    #[tokio::test]
    async fn forward_walk_covers_feed_without_gaps_or_duplicates() {
        let posts: Vec<(i64, i64, i64)> = (1..=17).map(|i| (i, 1, i * 10)).collect();
        let svc = service(FixtureStore::seeded(&posts));

        let mut seen = Vec::new();
        let mut request = PageRequest::first_page(5);
        loop {
            let page = svc.feed_page(&request).await.unwrap();
            seen.extend(page.records.iter().map(|r| r.id.as_i64()));
            if !page.has_more_history {
                break;
            }
            request = PageRequest::forward_from(page.next_forward_cursor.unwrap(), 5);
        }

        let expected: Vec<i64> = (1..=17).rev().collect();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn backward_page_returns_strictly_newer_rows() {
        let posts: Vec<(i64, i64, i64)> = (1..=9).map(|i| (i, 1, i * 10)).collect();
        let svc = service(FixtureStore::seeded(&posts));

        // Land mid-feed, then scroll back toward freshness.
        let first = svc.feed_page(&PageRequest::first_page(6)).await.unwrap();
        let anchor = first.next_forward_cursor.unwrap(); // row 4
        let mid = svc
            .feed_page(&PageRequest::forward_from(anchor, 2))
            .await
            .unwrap();
        let min_cursor = mid.next_backward_cursor.unwrap(); // row 3

        let newer = svc
            .feed_page(&PageRequest::backward_from(min_cursor, 2))
            .await
            .unwrap();
        let ids: Vec<i64> = newer.records.iter().map(|r| r.id.as_i64()).collect();
        assert_eq!(ids, vec![5, 4]);
        assert!(newer.has_more_new);
    }

    #[tokio::test]
    async fn my_posts_only_sees_the_author() {
        let svc = service(FixtureStore::seeded(&[
            (1, 7, 100),
            (2, 8, 200),
            (3, 7, 300),
        ]));

        let page = svc
            .my_posts_page(UserId::new(7), &PageRequest::first_page(10))
            .await
            .unwrap();
        let ids: Vec<i64> = page.records.iter().map(|r| r.id.as_i64()).collect();
        assert_eq!(ids, vec![3, 1]);
        assert!(!page.has_more_history);
    }

    #[tokio::test]
    async fn malformed_cursor_serves_first_page() {
        let svc = service(FixtureStore::seeded(&[(1, 1, 100), (2, 1, 200)]));

        let clean = svc.feed_page(&PageRequest::first_page(10)).await.unwrap();
        let dirty = svc
            .feed_page(&PageRequest::forward_from("!!bad!!", 10))
            .await
            .unwrap();
        assert_eq!(clean.records, dirty.records);
    }

    #[tokio::test]
    async fn publish_assigns_monotonic_ids() {
        let svc = service(FixtureStore::default());

        let a = svc
            .publish(NewJobPost {
                author_id: UserId::new(1),
                title: "barista".into(),
                body: "weekend shifts".into(),
                pay: Some("$15/h".into()),
            })
            .await
            .unwrap();
        let b = svc
            .publish(NewJobPost {
                author_id: UserId::new(1),
                title: "runner".into(),
                body: "evenings".into(),
                pay: None,
            })
            .await
            .unwrap();
        assert!(b.id.as_i64() > a.id.as_i64());
        assert!(b.cursor_key() > a.cursor_key());
    }

    #[tokio::test]
    async fn publish_rejects_blank_title() {
        let svc = service(FixtureStore::default());
        let err = svc
            .publish(NewJobPost {
                author_id: UserId::new(1),
                title: "  ".into(),
                body: "body".into(),
                pay: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Domain(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn retract_requires_the_author() {
        let svc = service(FixtureStore::seeded(&[(5, 7, 100)]));

        let err = svc.retract(UserId::new(8), JobId::new(5)).await.unwrap_err();
        assert!(matches!(err, FeedError::Domain(DomainError::Unauthorized)));

        svc.retract(UserId::new(7), JobId::new(5)).await.unwrap();
        let err = svc.get(JobId::new(5)).await.unwrap_err();
        assert!(matches!(err, FeedError::Domain(DomainError::NotFound)));
    }
}
