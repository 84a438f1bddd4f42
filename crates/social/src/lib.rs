//! `jobboard-social` — likes on job posts and follows between users.

pub mod service;
pub mod store;

pub use service::{FollowSummary, LikeSummary, SocialError, SocialService};
pub use store::SocialStore;
