//! Strongly-typed identifiers used across the domain.
//!
//! All row identifiers are `i64` newtypes. Identifiers are assigned
//! monotonically non-decreasing at creation time (auto-increment primary key
//! in Postgres, an atomic counter in the in-memory store); the pagination
//! engine relies on this for its tie-break ordering.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a user (actor identity).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

/// Identifier of a job post (a feed row).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(i64);

/// Identifier of a comment (parent or child).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(i64);

macro_rules! impl_i64_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = i64::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(raw))
            }
        }
    };
}

impl_i64_newtype!(UserId, "UserId");
impl_i64_newtype!(JobId, "JobId");
impl_i64_newtype!(CommentId, "CommentId");
