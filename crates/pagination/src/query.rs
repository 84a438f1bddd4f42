//! Ordered range query construction.
//!
//! Translates a direction plus an optional anchor cursor into the filter
//! predicate, sort order and fetch limit for one page of a collection keyed
//! by `(created_at, id)`. The builder only shapes the query; deciding page
//! boundaries from the fetched rows is [`crate::paginator`]'s job.

use chrono::{DateTime, Utc};

use crate::cursor::CursorKey;

/// Scan direction relative to an anchor row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// Toward history: rows strictly older than the anchor.
    Forward,
    /// Toward freshness: rows strictly newer than the anchor.
    Backward,
}

/// One page's worth of query shape: predicate, sort order, fetch limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeQuery {
    anchor: Option<CursorKey>,
    direction: ScanDirection,
    page_size: i64,
}

impl RangeQuery {
    /// First-load query: no predicate, newest first.
    pub fn initial(page_size: i64) -> Self {
        Self {
            anchor: None,
            direction: ScanDirection::Forward,
            page_size,
        }
    }

    /// Build a query for `direction` anchored at `cursor`.
    ///
    /// A missing or malformed cursor degrades to the unfiltered first page;
    /// a bad token must never fail the request. A backward scan without an
    /// anchor has nothing to be newer than, so it degrades the same way.
    pub fn anchored(direction: ScanDirection, cursor: Option<&str>, page_size: i64) -> Self {
        let anchor = cursor.and_then(|token| match CursorKey::decode(token) {
            Ok(key) => Some(key),
            Err(err) => {
                tracing::debug!(%err, "ignoring malformed cursor, serving first page");
                None
            }
        });

        match anchor {
            Some(key) => Self {
                anchor: Some(key),
                direction,
                page_size,
            },
            None => Self::initial(page_size),
        }
    }

    pub fn forward(cursor: Option<&str>, page_size: i64) -> Self {
        Self::anchored(ScanDirection::Forward, cursor, page_size)
    }

    pub fn backward(cursor: Option<&str>, page_size: i64) -> Self {
        Self::anchored(ScanDirection::Backward, cursor, page_size)
    }

    pub fn anchor(&self) -> Option<CursorKey> {
        self.anchor
    }

    pub fn direction(&self) -> ScanDirection {
        self.direction
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Rows to request from the store: one extra sentinel row past the page,
    /// whose presence signals that more data exists in this direction.
    pub fn fetch_limit(&self) -> i64 {
        self.page_size + 1
    }

    /// Whether the store must return rows ascending `(created_at, id)`.
    ///
    /// Backward scans fetch ascending so that `LIMIT n+1` yields the n rows
    /// adjacent to the anchor; the paginator reverses them before returning.
    /// Forward and first-load scans fetch descending (newest first).
    pub fn fetch_ascending(&self) -> bool {
        matches!(self.direction, ScanDirection::Backward)
    }

    /// Filter predicate over `(created_at, id)`, for stores that evaluate
    /// rows in memory. SQL stores render the equivalent keyset predicate.
    pub fn admits(&self, created_at: DateTime<Utc>, id: i64) -> bool {
        let key = CursorKey::new(created_at, id);
        match self.anchor {
            None => true,
            Some(anchor) => match self.direction {
                ScanDirection::Forward => key < anchor,
                ScanDirection::Backward => key > anchor,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(micros: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_micros(micros).unwrap()
    }

    #[test]
    fn initial_admits_everything_newest_first() {
        let q = RangeQuery::initial(20);
        assert!(q.admits(ts(1), 1));
        assert!(q.admits(ts(i64::from(u32::MAX)), 999));
        assert!(!q.fetch_ascending());
        assert_eq!(q.fetch_limit(), 21);
    }

    #[test]
    fn forward_excludes_anchor_and_newer() {
        let anchor = CursorKey::new(ts(1_000), 50).encode();
        let q = RangeQuery::forward(Some(&anchor), 10);

        assert!(q.admits(ts(999), 99)); // older timestamp
        assert!(q.admits(ts(1_000), 49)); // same timestamp, smaller id
        assert!(!q.admits(ts(1_000), 50)); // the anchor itself
        assert!(!q.admits(ts(1_000), 51)); // tie, newer id
        assert!(!q.admits(ts(1_001), 1)); // newer timestamp
        assert!(!q.fetch_ascending());
    }

    #[test]
    fn backward_excludes_anchor_and_older() {
        let anchor = CursorKey::new(ts(1_000), 50).encode();
        let q = RangeQuery::backward(Some(&anchor), 10);

        assert!(q.admits(ts(1_001), 1));
        assert!(q.admits(ts(1_000), 51));
        assert!(!q.admits(ts(1_000), 50));
        assert!(!q.admits(ts(1_000), 49));
        assert!(!q.admits(ts(999), 99));
        assert!(q.fetch_ascending());
    }

    #[test]
    fn malformed_cursor_degrades_to_initial() {
        let q = RangeQuery::forward(Some("not-a-cursor"), 10);
        assert_eq!(q, RangeQuery::initial(10));

        let q = RangeQuery::backward(Some("not-a-cursor"), 10);
        assert_eq!(q, RangeQuery::initial(10));
    }

    #[test]
    fn backward_without_anchor_degrades_to_initial() {
        let q = RangeQuery::backward(None, 10);
        assert_eq!(q, RangeQuery::initial(10));
    }
}
