//! `jobboard-infra` — store implementations behind the domain seams.
//!
//! Two backends: Postgres (sqlx) for deployment, and in-memory stores with
//! the same ordering contract for tests and local development.

pub mod profiles;
pub mod store;

pub use profiles::{InMemoryProfileDirectory, PostgresProfileResolver};
pub use store::memory::{InMemoryCommentStore, InMemoryFeedStore, InMemorySocialStore};
pub use store::postgres::{PostgresCommentStore, PostgresFeedStore, PostgresSocialStore};
