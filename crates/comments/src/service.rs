//! Comment tree assembly.
//!
//! Two independent pagination axes: the parent axis (top-level comments of a
//! job, forward-only) and the child axis (replies under one parent). Both
//! reuse the shared pagination engine; this service only composes them and
//! joins in author display metadata.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use jobboard_core::{CommentId, DomainError, JobId, StoreError, UserId};
use jobboard_pagination::{Page, PageLimits, PageRequest, RangeQuery, assemble};

use crate::comment::{Comment, NewComment, ParentRef};
use crate::profile::{Profile, ProfileResolver, UNKNOWN_USER};
use crate::store::CommentStore;
use crate::view::{ChildSlice, CommentView, ParentCommentView};

/// Comment-level failure: a domain rule or the store.
#[derive(Debug, Error)]
pub enum CommentError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Stateless service over a [`CommentStore`] plus a [`ProfileResolver`].
#[derive(Clone)]
pub struct CommentTreeService {
    store: Arc<dyn CommentStore>,
    profiles: Arc<dyn ProfileResolver>,
}

impl CommentTreeService {
    pub fn new(store: Arc<dyn CommentStore>, profiles: Arc<dyn ProfileResolver>) -> Self {
        Self { store, profiles }
    }

    /// One page of top-level comments, each carrying a bounded slice of its
    /// children with that slice's own cursor and has-more flag.
    ///
    /// A missing subject yields an empty, well-formed page: "no subject" and
    /// "no content" look the same to the UI. The parent axis only scrolls
    /// toward history, so only the forward cursor of `request` is honored.
    pub async fn parent_page(
        &self,
        job_id: Option<JobId>,
        request: &PageRequest,
        child_page_size: Option<i64>,
    ) -> Result<Page<ParentCommentView>, StoreError> {
        let Some(job_id) = job_id else {
            return Ok(Page::empty());
        };

        let query = RangeQuery::forward(
            request.forward_cursor.as_deref(),
            PageLimits::PARENT_COMMENTS.clamp(request.page_size),
        );
        let rows = self.store.fetch_page(job_id, ParentRef::TopLevel, &query).await?;
        let page = assemble(&query, rows);
        let total = self.store.count_top_level(job_id).await?;

        let parent_ids: Vec<CommentId> = page.records.iter().map(|c| c.id).collect();
        let child_counts = self.store.count_children(&parent_ids).await?;

        // Top children per parent: an unanchored forward slice, newest first.
        let child_size = PageLimits::CHILD_COMMENTS.clamp(child_page_size);
        let mut children_by_parent: HashMap<CommentId, (Vec<Comment>, Option<String>)> =
            HashMap::new();
        for parent in &page.records {
            let child_query = RangeQuery::initial(child_size);
            let child_rows = self
                .store
                .fetch_page(job_id, ParentRef::ChildOf(parent.id), &child_query)
                .await?;
            let child_page = assemble(&child_query, child_rows);
            children_by_parent.insert(
                parent.id,
                (child_page.records, child_page.next_forward_cursor),
            );
        }

        let mut author_ids: Vec<UserId> = page.records.iter().map(|c| c.author_id).collect();
        for (children, _) in children_by_parent.values() {
            for child in children {
                author_ids.push(child.author_id);
                if let Some(reply_to) = child.reply_to {
                    author_ids.push(reply_to);
                }
            }
        }
        let profiles = self.resolve_profiles(author_ids).await;

        Ok(page
            .map(|parent| {
                let (children, children_next_cursor) = children_by_parent
                    .remove(&parent.id)
                    .unwrap_or((Vec::new(), None));
                let children_count = child_counts.get(&parent.id).copied().unwrap_or(0);
                let has_more_children = children_count > children.len() as i64;

                ParentCommentView {
                    comment: render(&parent, &profiles),
                    children: children.iter().map(|c| render(c, &profiles)).collect(),
                    children_count,
                    has_more_children,
                    children_next_cursor: if has_more_children {
                        children_next_cursor
                    } else {
                        None
                    },
                }
            })
            .with_total(total))
    }

    /// Load the next slice of children under one parent, scoped forward-only.
    ///
    /// An unknown parent yields an empty, cursor-less slice. The child count
    /// reflects the live count at call time.
    pub async fn more_children(
        &self,
        parent_id: CommentId,
        request: &PageRequest,
    ) -> Result<ChildSlice, StoreError> {
        let Some(parent) = self.store.get(parent_id).await? else {
            return Ok(ChildSlice::empty());
        };

        let query = RangeQuery::forward(
            request.forward_cursor.as_deref(),
            PageLimits::CHILD_COMMENTS.clamp(request.page_size),
        );
        let rows = self
            .store
            .fetch_page(parent.job_id, ParentRef::ChildOf(parent_id), &query)
            .await?;
        let page = assemble(&query, rows);

        let children_count = self
            .store
            .count_children(&[parent_id])
            .await?
            .get(&parent_id)
            .copied()
            .unwrap_or(0);

        let mut author_ids: Vec<UserId> = Vec::new();
        for child in &page.records {
            author_ids.push(child.author_id);
            if let Some(reply_to) = child.reply_to {
                author_ids.push(reply_to);
            }
        }
        let profiles = self.resolve_profiles(author_ids).await;

        Ok(ChildSlice {
            records: page.records.iter().map(|c| render(c, &profiles)).collect(),
            children_count,
            has_more_children: page.has_more_history,
            next_child_cursor: page.next_forward_cursor,
        })
    }

    /// Post a comment.
    ///
    /// Replies nest at most one level: replying to a child re-attaches the
    /// new comment under that child's parent and records the child's author
    /// as the reply target.
    pub async fn post(&self, mut new: NewComment) -> Result<Comment, CommentError> {
        if new.body.trim().is_empty() {
            return Err(DomainError::validation("comment body must not be empty").into());
        }

        match new.parent {
            ParentRef::TopLevel => {
                new.reply_to = None;
            }
            ParentRef::ChildOf(target_id) => {
                let target = self
                    .store
                    .get(target_id)
                    .await?
                    .ok_or(DomainError::NotFound)?;
                if target.job_id != new.job_id {
                    return Err(
                        DomainError::validation("parent comment belongs to another job").into(),
                    );
                }
                if let ParentRef::ChildOf(grandparent) = target.parent {
                    new.parent = ParentRef::ChildOf(grandparent);
                    new.reply_to = Some(target.author_id);
                }
            }
        }

        Ok(self.store.insert(new).await?)
    }

    /// Remove a comment; only its author may do so. Removing a top-level
    /// comment removes its children with it.
    pub async fn remove(&self, actor: UserId, id: CommentId) -> Result<(), CommentError> {
        let comment = self.store.get(id).await?.ok_or(DomainError::NotFound)?;
        if comment.author_id != actor {
            return Err(DomainError::Unauthorized.into());
        }
        self.store.delete(id).await?;
        Ok(())
    }

    async fn resolve_profiles(&self, mut ids: Vec<UserId>) -> HashMap<UserId, Profile> {
        ids.sort_unstable();
        ids.dedup();
        match self.profiles.resolve(&ids).await {
            Ok(map) => map,
            Err(err) => {
                // Enrichment must never abort a page.
                tracing::warn!(%err, "profile enrichment failed, rendering unknown authors");
                HashMap::new()
            }
        }
    }
}

fn render(comment: &Comment, profiles: &HashMap<UserId, Profile>) -> CommentView {
    let author = profiles.get(&comment.author_id);
    CommentView {
        id: comment.id,
        job_id: comment.job_id,
        author_id: comment.author_id,
        author_name: author
            .map(|p| p.display_name.clone())
            .unwrap_or_else(|| UNKNOWN_USER.to_string()),
        author_avatar_url: author.and_then(|p| p.avatar_url.clone()),
        reply_to_name: comment.reply_to.map(|uid| {
            profiles
                .get(&uid)
                .map(|p| p.display_name.clone())
                .unwrap_or_else(|| UNKNOWN_USER.to_string())
        }),
        body: comment.body.clone(),
        created_at: comment.created_at,
    }
}
