//! `jobboard-comments` — two-level comment tree with independent pagination
//! of the parent axis and each parent's child axis.

pub mod comment;
pub mod profile;
pub mod service;
pub mod store;
pub mod view;

pub use comment::{Comment, NewComment, ParentRef};
pub use profile::{Profile, ProfileResolver, UNKNOWN_USER};
pub use service::{CommentError, CommentTreeService};
pub use store::CommentStore;
pub use view::{ChildSlice, CommentView, ParentCommentView};
