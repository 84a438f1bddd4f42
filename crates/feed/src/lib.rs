//! `jobboard-feed` — job posts and the bidirectional feed.

pub mod job;
pub mod service;
pub mod store;

pub use job::{JobPost, NewJobPost};
pub use service::{FeedError, FeedService};
pub use store::{FeedScope, FeedStore};
