//! Service container shared by all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use jobboard_comments::CommentTreeService;
use jobboard_feed::FeedService;
use jobboard_infra::{
    InMemoryCommentStore, InMemoryFeedStore, InMemoryProfileDirectory, InMemorySocialStore,
    PostgresCommentStore, PostgresFeedStore, PostgresProfileResolver, PostgresSocialStore,
};
use jobboard_social::SocialService;

/// One instance per process, handed to handlers as an `Extension`.
pub struct AppServices {
    pub feed: FeedService,
    pub comments: CommentTreeService,
    pub social: SocialService,
}

impl AppServices {
    /// Wire every service against Postgres.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            feed: FeedService::new(Arc::new(PostgresFeedStore::new(pool.clone()))),
            comments: CommentTreeService::new(
                Arc::new(PostgresCommentStore::new(pool.clone())),
                Arc::new(PostgresProfileResolver::new(pool.clone())),
            ),
            social: SocialService::new(Arc::new(PostgresSocialStore::new(pool))),
        }
    }

    /// Wire every service against in-memory stores; returns the profile
    /// directory so callers (dev mode, tests) can seed display names.
    pub fn in_memory() -> (Self, Arc<InMemoryProfileDirectory>) {
        let profiles = Arc::new(InMemoryProfileDirectory::new());
        let services = Self {
            feed: FeedService::new(Arc::new(InMemoryFeedStore::new())),
            comments: CommentTreeService::new(
                Arc::new(InMemoryCommentStore::new()),
                profiles.clone(),
            ),
            social: SocialService::new(Arc::new(InMemorySocialStore::new())),
        };
        (services, profiles)
    }
}
