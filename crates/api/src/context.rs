//! Request-scoped identity.
//!
//! The authenticated user travels as an explicit extension on the request,
//! threaded into every handler that needs it, never read from ambient or
//! thread-local state.

use jobboard_core::UserId;

/// Identity context for a request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UserContext {
    user_id: UserId,
}

impl UserContext {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}
