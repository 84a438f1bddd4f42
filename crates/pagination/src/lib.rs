//! `jobboard-pagination` — cursor-based pagination engine.
//!
//! Pages a mutable, concurrently-written, time-ordered collection in both
//! directions (toward history and toward freshness) without skips or
//! duplicates. All list-like endpoints (feed, "my posts", parent comments,
//! child comments) share this one engine instead of re-deriving the
//! algorithm per endpoint.
//!
//! The engine is stateless and reentrant: every page request is an
//! independent unit of work, a pure function of the rows the store returned
//! for it. Rows are keyed by `(created_at, id)`, unique and totally ordered
//! with `id` as the tie-break; ids are assigned monotonically at creation.

pub mod cursor;
pub mod page;
pub mod paginator;
pub mod query;

pub use cursor::{CursorError, CursorKey};
pub use page::{Page, PageItem, PageLimits, PageRequest};
pub use paginator::assemble;
pub use query::{RangeQuery, ScanDirection};
