//! Transport-facing comment shapes: stored rows joined with author display
//! metadata, and per-parent child pagination state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use jobboard_core::{CommentId, JobId, UserId};

/// One rendered comment (parent or child).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    pub id: CommentId,
    pub job_id: JobId,
    pub author_id: UserId,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    /// Display name of the author being replied to (child comments only).
    pub reply_to_name: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A top-level comment with a bounded slice of its children.
///
/// The child slice paginates independently of the parent page: its cursor
/// and has-more flag are scoped to this one parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentCommentView {
    #[serde(flatten)]
    pub comment: CommentView,
    pub children: Vec<CommentView>,
    pub children_count: i64,
    pub has_more_children: bool,
    pub children_next_cursor: Option<String>,
}

/// Result of a "load more children" call for one parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildSlice {
    pub records: Vec<CommentView>,
    pub children_count: i64,
    pub has_more_children: bool,
    pub next_child_cursor: Option<String>,
}

impl ChildSlice {
    /// Empty, cursor-less slice (e.g. unknown parent id).
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            children_count: 0,
            has_more_children: false,
            next_child_cursor: None,
        }
    }
}
