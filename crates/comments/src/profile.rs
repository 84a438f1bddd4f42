//! Read enrichment: author display metadata.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use jobboard_core::{StoreError, UserId};

/// Display name rendered when an author cannot be resolved. Enrichment never
/// aborts a page.
pub const UNKNOWN_USER: &str = "unknown user";

/// Display metadata for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// Batch lookup of author profiles.
///
/// Unknown ids are simply absent from the result, not an error.
#[async_trait]
pub trait ProfileResolver: Send + Sync {
    async fn resolve(&self, ids: &[UserId]) -> Result<HashMap<UserId, Profile>, StoreError>;
}
