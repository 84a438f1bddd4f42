//! Profile resolvers: author display metadata for read enrichment.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use jobboard_comments::{Profile, ProfileResolver};
use jobboard_core::{StoreError, UserId};

use crate::store::postgres::backend;

/// In-memory profile directory for tests and local development.
#[derive(Default)]
pub struct InMemoryProfileDirectory {
    profiles: RwLock<HashMap<UserId, Profile>>,
}

impl InMemoryProfileDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, profile: Profile) {
        self.profiles
            .write()
            .unwrap()
            .insert(profile.user_id, profile);
    }
}

#[async_trait]
impl ProfileResolver for InMemoryProfileDirectory {
    async fn resolve(&self, ids: &[UserId]) -> Result<HashMap<UserId, Profile>, StoreError> {
        let profiles = self.profiles.read().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| profiles.get(id).map(|p| (*id, p.clone())))
            .collect())
    }
}

/// Postgres-backed resolver over the `profiles` table.
pub struct PostgresProfileResolver {
    pool: Arc<PgPool>,
}

impl PostgresProfileResolver {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl ProfileResolver for PostgresProfileResolver {
    async fn resolve(&self, ids: &[UserId]) -> Result<HashMap<UserId, Profile>, StoreError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.as_i64()).collect();
        let rows = sqlx::query(
            "SELECT user_id, display_name, avatar_url FROM profiles WHERE user_id = ANY($1)",
        )
        .bind(&raw)
        .fetch_all(&*self.pool)
        .await
        .map_err(backend)?;

        rows.iter()
            .map(|row| {
                let user_id = UserId::new(row.try_get("user_id").map_err(backend)?);
                Ok((
                    user_id,
                    Profile {
                        user_id,
                        display_name: row.try_get("display_name").map_err(backend)?,
                        avatar_url: row.try_get("avatar_url").map_err(backend)?,
                    },
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_ids_are_absent_not_errors() {
        let directory = InMemoryProfileDirectory::new();
        directory.upsert(Profile {
            user_id: UserId::new(1),
            display_name: "ada".into(),
            avatar_url: None,
        });

        let resolved = directory
            .resolve(&[UserId::new(1), UserId::new(999)])
            .await
            .unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[&UserId::new(1)].display_name, "ada");
        assert!(!resolved.contains_key(&UserId::new(999)));
    }
}
