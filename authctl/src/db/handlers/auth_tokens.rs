//! Database repository for session tokens.

use sqlx::PgConnection;
use tracing::instrument;

use crate::{
    db::{errors::Result, models::auth_tokens::AuthToken},
    types::{UserId, abbrev_uuid},
};

/// Session tokens, at most one per user, keyed by user.
pub struct AuthTokens<'c> {
    db: &'c mut PgConnection,
}

impl<'c> AuthTokens<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Store `key_digest` as the user's only token, replacing any previous one.
    #[instrument(skip(self, key_digest), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn upsert(&mut self, user_id: UserId, key_digest: &str) -> Result<AuthToken> {
        let token = sqlx::query_as::<_, AuthToken>(
            r#"
            INSERT INTO auth_tokens (user_id, key_digest)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET key_digest = EXCLUDED.key_digest, created_at = NOW()
            RETURNING user_id, key_digest, created_at
            "#,
        )
        .bind(user_id)
        .bind(key_digest)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(token)
    }

    #[instrument(skip(self, key_digest), err)]
    pub async fn get_by_digest(&mut self, key_digest: &str) -> Result<Option<AuthToken>> {
        let token = sqlx::query_as::<_, AuthToken>("SELECT user_id, key_digest, created_at FROM auth_tokens WHERE key_digest = $1")
            .bind(key_digest)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(token)
    }

    /// Delete the user's token. Returns false when there was none.
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn delete_for_user(&mut self, user_id: UserId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
