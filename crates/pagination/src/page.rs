//! Page request/result structures shared by all list endpoints.

use serde::{Deserialize, Serialize};

use crate::cursor::CursorKey;
use crate::query::{RangeQuery, ScanDirection};

/// Caller-facing page request.
///
/// At most one of the two cursors is honored; if both are supplied, the
/// forward cursor takes precedence. Cursor fields are opaque tokens produced
/// by a previous [`Page`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageRequest {
    pub page_size: Option<i64>,
    /// Scan toward history / older rows (a.k.a. `max_cursor`).
    pub forward_cursor: Option<String>,
    /// Scan toward freshness / newer rows (a.k.a. `min_cursor`).
    pub backward_cursor: Option<String>,
}

impl PageRequest {
    pub fn first_page(page_size: i64) -> Self {
        Self {
            page_size: Some(page_size),
            forward_cursor: None,
            backward_cursor: None,
        }
    }

    pub fn forward_from(cursor: impl Into<String>, page_size: i64) -> Self {
        Self {
            page_size: Some(page_size),
            forward_cursor: Some(cursor.into()),
            backward_cursor: None,
        }
    }

    pub fn backward_from(cursor: impl Into<String>, page_size: i64) -> Self {
        Self {
            page_size: Some(page_size),
            forward_cursor: None,
            backward_cursor: Some(cursor.into()),
        }
    }

    /// Resolve the scan direction and the cursor it honors (forward wins).
    pub fn scan(&self) -> (ScanDirection, Option<&str>) {
        if self.forward_cursor.is_some() {
            (ScanDirection::Forward, self.forward_cursor.as_deref())
        } else if self.backward_cursor.is_some() {
            (ScanDirection::Backward, self.backward_cursor.as_deref())
        } else {
            (ScanDirection::Forward, None)
        }
    }

    /// Shape the range query for this request under the given limits.
    pub fn range_query(&self, limits: PageLimits) -> RangeQuery {
        let (direction, cursor) = self.scan();
        RangeQuery::anchored(direction, cursor, limits.clamp(self.page_size))
    }
}

/// Page-size policy for one list type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: i64,
    pub max_size: i64,
}

impl PageLimits {
    /// Feed and "my posts" pages.
    pub const FEED: Self = Self {
        default_size: 20,
        max_size: 100,
    };

    /// Top-level comment pages.
    pub const PARENT_COMMENTS: Self = Self {
        default_size: 10,
        max_size: 50,
    };

    /// Child slices, both inline on a parent page and via "load more".
    pub const CHILD_COMMENTS: Self = Self {
        default_size: 3,
        max_size: 20,
    };

    /// Apply the documented default for absent/non-positive sizes and cap
    /// oversized requests.
    pub fn clamp(&self, requested: Option<i64>) -> i64 {
        match requested {
            Some(n) if n > 0 => n.min(self.max_size),
            _ => self.default_size,
        }
    }
}

/// A row that can be paginated: exposes its `(created_at, id)` ordering key.
pub trait PageItem {
    fn item_id(&self) -> i64;
    fn item_created_at(&self) -> chrono::DateTime<chrono::Utc>;

    fn cursor_key(&self) -> CursorKey {
        CursorKey::new(self.item_created_at(), self.item_id())
    }
}

/// One page of records plus the cursors to continue in either direction.
///
/// Records are always ordered newest-first. Both continuation cursors are
/// populated whenever the page is non-empty, since a client may scroll
/// either way from the page it just rendered.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub next_forward_cursor: Option<String>,
    pub next_backward_cursor: Option<String>,
    pub has_more_history: bool,
    pub has_more_new: bool,
    pub total: Option<i64>,
}

impl<T> Page<T> {
    /// Empty, cursor-less page. Also the well-formed answer for requests
    /// lacking a subject (pagination is total over its input space).
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            next_forward_cursor: None,
            next_backward_cursor: None,
            has_more_history: false,
            has_more_new: false,
            total: None,
        }
    }

    pub fn with_total(mut self, total: i64) -> Self {
        self.total = Some(total);
        self
    }

    /// Map records while keeping cursors and flags intact (read enrichment
    /// must not affect pagination).
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            records: self.records.into_iter().map(f).collect(),
            next_forward_cursor: self.next_forward_cursor,
            next_backward_cursor: self.next_backward_cursor,
            has_more_history: self.has_more_history,
            has_more_new: self.has_more_new,
            total: self.total,
        }
    }
}
