//! Job post model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jobboard_core::{JobId, UserId};
use jobboard_pagination::PageItem;

/// A published job post (one feed row).
///
/// `id` is assigned by the store, monotonically non-decreasing; `created_at`
/// is set once on insert. Neither changes afterwards; they are the feed's
/// ordering keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPost {
    pub id: JobId,
    pub author_id: UserId,
    pub title: String,
    pub body: String,
    /// Free-form pay description ("$18/h", "negotiable").
    pub pay: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PageItem for JobPost {
    fn item_id(&self) -> i64 {
        self.id.as_i64()
    }

    fn item_created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Input for publishing a job post; id and timestamp come from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJobPost {
    pub author_id: UserId,
    pub title: String,
    pub body: String,
    pub pay: Option<String>,
}
