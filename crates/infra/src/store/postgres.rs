//! Postgres-backed stores.
//!
//! Pagination queries are keyset scans over the `(created_at, id)` compound
//! key: the anchor predicate and sort direction come straight from the
//! engine's [`RangeQuery`], rendered once by the helpers below and shared by
//! every list-like table. Backed by `(subject, created_at, id)` indexes, see
//! `migrations/0001_schema.sql`.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use jobboard_comments::{Comment, CommentStore, NewComment, ParentRef};
use jobboard_core::{CommentId, JobId, StoreError, UserId};
use jobboard_feed::{FeedScope, FeedStore, JobPost, NewJobPost};
use jobboard_pagination::RangeQuery;
use jobboard_social::SocialStore;

pub(crate) fn backend(err: sqlx::Error) -> StoreError {
    StoreError::backend(err.to_string())
}

/// Append the keyset anchor predicate, if the query has one.
///
/// Forward scans want rows strictly below the anchor, backward scans rows
/// strictly above it; ties on `created_at` fall back to `id`.
fn push_keyset(builder: &mut QueryBuilder<'_, Postgres>, query: &RangeQuery) {
    let Some(anchor) = query.anchor() else {
        return;
    };
    let op = if query.fetch_ascending() { ">" } else { "<" };

    builder.push(" AND (created_at ");
    builder.push(op);
    builder.push(" ");
    builder.push_bind(anchor.created_at);
    builder.push(" OR (created_at = ");
    builder.push_bind(anchor.created_at);
    builder.push(" AND id ");
    builder.push(op);
    builder.push(" ");
    builder.push_bind(anchor.id);
    builder.push("))");
}

/// Append the compound sort and the `page_size + 1` fetch limit.
fn push_order_limit(builder: &mut QueryBuilder<'_, Postgres>, query: &RangeQuery) {
    let dir = if query.fetch_ascending() { "ASC" } else { "DESC" };
    builder.push(" ORDER BY created_at ");
    builder.push(dir);
    builder.push(", id ");
    builder.push(dir);
    builder.push(" LIMIT ");
    builder.push_bind(query.fetch_limit());
}

pub struct PostgresFeedStore {
    pool: Arc<PgPool>,
}

impl PostgresFeedStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

fn job_from_row(row: &PgRow) -> Result<JobPost, StoreError> {
    Ok(JobPost {
        id: JobId::new(row.try_get("id").map_err(backend)?),
        author_id: UserId::new(row.try_get("author_id").map_err(backend)?),
        title: row.try_get("title").map_err(backend)?,
        body: row.try_get("body").map_err(backend)?,
        pay: row.try_get("pay").map_err(backend)?,
        created_at: row.try_get("created_at").map_err(backend)?,
    })
}

#[async_trait]
impl FeedStore for PostgresFeedStore {
    async fn fetch_page(
        &self,
        scope: FeedScope,
        query: &RangeQuery,
    ) -> Result<Vec<JobPost>, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT id, author_id, title, body, pay, created_at FROM job_posts WHERE TRUE",
        );
        if let FeedScope::Author(author) = scope {
            builder.push(" AND author_id = ");
            builder.push_bind(author.as_i64());
        }
        push_keyset(&mut builder, query);
        push_order_limit(&mut builder, query);

        let rows = builder
            .build()
            .fetch_all(&*self.pool)
            .await
            .map_err(backend)?;
        rows.iter().map(job_from_row).collect()
    }

    async fn insert(&self, new: NewJobPost) -> Result<JobPost, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO job_posts (author_id, title, body, pay)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_id, title, body, pay, created_at
            "#,
        )
        .bind(new.author_id.as_i64())
        .bind(&new.title)
        .bind(&new.body)
        .bind(&new.pay)
        .fetch_one(&*self.pool)
        .await
        .map_err(backend)?;
        job_from_row(&row)
    }

    async fn get(&self, id: JobId) -> Result<Option<JobPost>, StoreError> {
        let row = sqlx::query(
            "SELECT id, author_id, title, body, pay, created_at FROM job_posts WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&*self.pool)
        .await
        .map_err(backend)?;
        row.as_ref().map(job_from_row).transpose()
    }

    async fn delete(&self, id: JobId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM job_posts WHERE id = $1")
            .bind(id.as_i64())
            .execute(&*self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct PostgresCommentStore {
    pool: Arc<PgPool>,
}

impl PostgresCommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

fn comment_from_row(row: &PgRow) -> Result<Comment, StoreError> {
    let parent_raw: i64 = row.try_get("parent_id").map_err(backend)?;
    let reply_to: Option<i64> = row.try_get("reply_to").map_err(backend)?;
    Ok(Comment {
        id: CommentId::new(row.try_get("id").map_err(backend)?),
        job_id: JobId::new(row.try_get("job_id").map_err(backend)?),
        author_id: UserId::new(row.try_get("author_id").map_err(backend)?),
        parent: ParentRef::from(parent_raw),
        reply_to: reply_to.map(UserId::new),
        body: row.try_get("body").map_err(backend)?,
        created_at: row.try_get("created_at").map_err(backend)?,
    })
}

#[async_trait]
impl CommentStore for PostgresCommentStore {
    async fn fetch_page(
        &self,
        job_id: JobId,
        parent: ParentRef,
        query: &RangeQuery,
    ) -> Result<Vec<Comment>, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT id, job_id, author_id, parent_id, reply_to, body, created_at \
             FROM comments WHERE job_id = ",
        );
        builder.push_bind(job_id.as_i64());
        builder.push(" AND parent_id = ");
        builder.push_bind(parent.as_raw());
        push_keyset(&mut builder, query);
        push_order_limit(&mut builder, query);

        let rows = builder
            .build()
            .fetch_all(&*self.pool)
            .await
            .map_err(backend)?;
        rows.iter().map(comment_from_row).collect()
    }

    async fn count_top_level(&self, job_id: JobId) -> Result<i64, StoreError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE job_id = $1 AND parent_id = 0")
            .bind(job_id.as_i64())
            .fetch_one(&*self.pool)
            .await
            .map_err(backend)
    }

    async fn count_children(
        &self,
        parents: &[CommentId],
    ) -> Result<std::collections::HashMap<CommentId, i64>, StoreError> {
        if parents.is_empty() {
            return Ok(Default::default());
        }
        let ids: Vec<i64> = parents.iter().map(|id| id.as_i64()).collect();
        let rows = sqlx::query(
            "SELECT parent_id, COUNT(*) AS n FROM comments \
             WHERE parent_id = ANY($1) GROUP BY parent_id",
        )
        .bind(&ids)
        .fetch_all(&*self.pool)
        .await
        .map_err(backend)?;

        rows.iter()
            .map(|row| {
                let parent: i64 = row.try_get("parent_id").map_err(backend)?;
                let n: i64 = row.try_get("n").map_err(backend)?;
                Ok((CommentId::new(parent), n))
            })
            .collect()
    }

    async fn insert(&self, new: NewComment) -> Result<Comment, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO comments (job_id, author_id, parent_id, reply_to, body)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, job_id, author_id, parent_id, reply_to, body, created_at
            "#,
        )
        .bind(new.job_id.as_i64())
        .bind(new.author_id.as_i64())
        .bind(new.parent.as_raw())
        .bind(new.reply_to.map(|u| u.as_i64()))
        .bind(&new.body)
        .fetch_one(&*self.pool)
        .await
        .map_err(backend)?;
        comment_from_row(&row)
    }

    async fn get(&self, id: CommentId) -> Result<Option<Comment>, StoreError> {
        let row = sqlx::query(
            "SELECT id, job_id, author_id, parent_id, reply_to, body, created_at \
             FROM comments WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&*self.pool)
        .await
        .map_err(backend)?;
        row.as_ref().map(comment_from_row).transpose()
    }

    async fn delete(&self, id: CommentId) -> Result<bool, StoreError> {
        // Children go with their parent.
        let result = sqlx::query("DELETE FROM comments WHERE id = $1 OR parent_id = $1")
            .bind(id.as_i64())
            .execute(&*self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct PostgresSocialStore {
    pool: Arc<PgPool>,
}

impl PostgresSocialStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl SocialStore for PostgresSocialStore {
    async fn insert_like(&self, user: UserId, job: JobId) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "INSERT INTO job_likes (user_id, job_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user.as_i64())
        .bind(job.as_i64())
        .execute(&*self.pool)
        .await
        .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_like(&self, user: UserId, job: JobId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM job_likes WHERE user_id = $1 AND job_id = $2")
            .bind(user.as_i64())
            .bind(job.as_i64())
            .execute(&*self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }

    async fn is_liked(&self, user: UserId, job: JobId) -> Result<bool, StoreError> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM job_likes WHERE user_id = $1 AND job_id = $2)",
        )
        .bind(user.as_i64())
        .bind(job.as_i64())
        .fetch_one(&*self.pool)
        .await
        .map_err(backend)
    }

    async fn like_count(&self, job: JobId) -> Result<i64, StoreError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM job_likes WHERE job_id = $1")
            .bind(job.as_i64())
            .fetch_one(&*self.pool)
            .await
            .map_err(backend)
    }

    async fn insert_follow(
        &self,
        follower: UserId,
        followee: UserId,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "INSERT INTO user_follows (follower_id, followee_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(follower.as_i64())
        .bind(followee.as_i64())
        .execute(&*self.pool)
        .await
        .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_follow(
        &self,
        follower: UserId,
        followee: UserId,
    ) -> Result<bool, StoreError> {
        let result =
            sqlx::query("DELETE FROM user_follows WHERE follower_id = $1 AND followee_id = $2")
                .bind(follower.as_i64())
                .bind(followee.as_i64())
                .execute(&*self.pool)
                .await
                .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }

    async fn follower_count(&self, user: UserId) -> Result<i64, StoreError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM user_follows WHERE followee_id = $1")
            .bind(user.as_i64())
            .fetch_one(&*self.pool)
            .await
            .map_err(backend)
    }

    async fn following_count(&self, user: UserId) -> Result<i64, StoreError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM user_follows WHERE follower_id = $1")
            .bind(user.as_i64())
            .fetch_one(&*self.pool)
            .await
            .map_err(backend)
    }
}
