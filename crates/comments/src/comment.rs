//! Comment model.
//!
//! Comments form a two-level tree: top-level comments under a job post, and
//! child comments under one top-level parent. The store persists the parent
//! link as a raw `i64` where `0` means "top level"; inside the domain that
//! sentinel is lifted into [`ParentRef`] so it cannot be mistaken for a real
//! comment id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jobboard_core::{CommentId, JobId, UserId};
use jobboard_pagination::PageItem;

/// Parent linkage of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ParentRef {
    TopLevel,
    ChildOf(CommentId),
}

impl ParentRef {
    /// Raw store value for "no parent".
    pub const RAW_TOP_LEVEL: i64 = 0;

    pub fn as_raw(&self) -> i64 {
        match self {
            ParentRef::TopLevel => Self::RAW_TOP_LEVEL,
            ParentRef::ChildOf(id) => id.as_i64(),
        }
    }

    pub fn is_top_level(&self) -> bool {
        matches!(self, ParentRef::TopLevel)
    }
}

impl From<i64> for ParentRef {
    fn from(raw: i64) -> Self {
        if raw <= Self::RAW_TOP_LEVEL {
            ParentRef::TopLevel
        } else {
            ParentRef::ChildOf(CommentId::new(raw))
        }
    }
}

impl From<ParentRef> for i64 {
    fn from(parent: ParentRef) -> Self {
        parent.as_raw()
    }
}

/// A stored comment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub job_id: JobId,
    pub author_id: UserId,
    pub parent: ParentRef,
    /// For child comments: the author of the comment being replied to.
    pub reply_to: Option<UserId>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl PageItem for Comment {
    fn item_id(&self) -> i64 {
        self.id.as_i64()
    }

    fn item_created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Input for posting a comment; id and timestamp come from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub job_id: JobId,
    pub author_id: UserId,
    pub parent: ParentRef,
    pub reply_to: Option<UserId>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_zero_lifts_to_top_level() {
        assert_eq!(ParentRef::from(0), ParentRef::TopLevel);
        assert_eq!(ParentRef::from(-1), ParentRef::TopLevel);
        assert_eq!(ParentRef::from(7), ParentRef::ChildOf(CommentId::new(7)));
        assert_eq!(ParentRef::ChildOf(CommentId::new(7)).as_raw(), 7);
        assert_eq!(ParentRef::TopLevel.as_raw(), 0);
    }
}
