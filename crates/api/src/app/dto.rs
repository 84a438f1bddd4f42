//! Request payloads and query-string shapes.

use serde::Deserialize;

use jobboard_pagination::PageRequest;

/// Query-string form of a page request.
///
/// `max_cursor` scrolls toward history (older rows), `min_cursor` toward
/// freshness. Both are opaque tokens from a previous page; anything
/// unrecognizable degrades to a first page rather than an error.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page_size: Option<i64>,
    pub max_cursor: Option<String>,
    pub min_cursor: Option<String>,
    /// Inline child slice size on comment-tree pages.
    pub child_page_size: Option<i64>,
}

impl PageQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page_size: self.page_size,
            forward_cursor: self.max_cursor.clone(),
            backward_cursor: self.min_cursor.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub body: String,
    pub pay: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    /// Absent or non-positive means a top-level comment.
    pub parent_id: Option<i64>,
    pub body: String,
}
