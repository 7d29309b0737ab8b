//! Database models for session tokens.

use crate::types::UserId;
use chrono::{DateTime, Utc};

/// A stored session token. Only the digest of the token is kept.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AuthToken {
    pub user_id: UserId,
    pub key_digest: String,
    pub created_at: DateTime<Utc>,
}
