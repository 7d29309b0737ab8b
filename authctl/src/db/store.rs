//! Account storage abstraction.
//!
//! [`AccountStore`] is the seam between the account service and persistence. [`PgStore`]
//! runs each operation against PostgreSQL through the repositories in [`crate::db::handlers`];
//! [`crate::db::in_memory::InMemoryStore`] keeps everything in process memory.
//!
//! Every method is atomic on its own: token issuance replaces the previous token in one
//! statement, and [`AccountStore::swap_password_hash`] only writes when the stored hash is
//! still the one the caller verified against.

use sqlx::PgPool;
use tracing::instrument;

use crate::db::{
    errors::Result,
    handlers::{AuthTokens, UserFilter, Users},
    models::users::{ProfileUpdateDBRequest, UserCreateDBRequest, UserDBResponse},
};
use crate::types::{UserId, abbrev_uuid};

#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    /// Create a user together with its first session token.
    async fn create_user_with_token(&self, request: &UserCreateDBRequest, key_digest: &str) -> Result<UserDBResponse>;

    /// Create a user without a session token.
    async fn create_user(&self, request: &UserCreateDBRequest) -> Result<UserDBResponse>;

    async fn get_user(&self, id: UserId) -> Result<Option<UserDBResponse>>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserDBResponse>>;

    /// Users ordered newest first.
    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<UserDBResponse>>;

    /// Overwrite the mutable profile fields. Fails with `NotFound` for an unknown user.
    async fn update_profile(&self, id: UserId, request: &ProfileUpdateDBRequest) -> Result<UserDBResponse>;

    /// Replace the password hash only if it still equals `expected_hash`.
    async fn swap_password_hash(&self, id: UserId, expected_hash: &str, new_hash: &str) -> Result<bool>;

    /// Mark a user as verified staff, replacing the password hash when one is given.
    async fn promote_to_admin(&self, id: UserId, password_hash: Option<&str>) -> Result<UserDBResponse>;

    /// Make `key_digest` the user's only token.
    async fn issue_token(&self, user_id: UserId, key_digest: &str) -> Result<()>;

    /// Resolve a token digest to its user.
    async fn user_for_token(&self, key_digest: &str) -> Result<Option<UserDBResponse>>;

    /// Delete the user's token. Returns false when there was none.
    async fn revoke_token(&self, user_id: UserId) -> Result<bool>;
}

/// [`AccountStore`] over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AccountStore for PgStore {
    #[instrument(skip_all, fields(username = %request.username), err)]
    async fn create_user_with_token(&self, request: &UserCreateDBRequest, key_digest: &str) -> Result<UserDBResponse> {
        let mut tx = self.pool.begin().await?;
        let user = Users::new(&mut tx).create(request).await?;
        AuthTokens::new(&mut tx).upsert(user.id, key_digest).await?;
        tx.commit().await?;
        Ok(user)
    }

    async fn create_user(&self, request: &UserCreateDBRequest) -> Result<UserDBResponse> {
        let mut conn = self.pool.acquire().await?;
        Users::new(&mut conn).create(request).await
    }

    async fn get_user(&self, id: UserId) -> Result<Option<UserDBResponse>> {
        let mut conn = self.pool.acquire().await?;
        Users::new(&mut conn).get_by_id(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserDBResponse>> {
        let mut conn = self.pool.acquire().await?;
        Users::new(&mut conn).get_user_by_email(email).await
    }

    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<UserDBResponse>> {
        let mut conn = self.pool.acquire().await?;
        Users::new(&mut conn).list(filter).await
    }

    async fn update_profile(&self, id: UserId, request: &ProfileUpdateDBRequest) -> Result<UserDBResponse> {
        let mut conn = self.pool.acquire().await?;
        Users::new(&mut conn).update(id, request).await
    }

    async fn swap_password_hash(&self, id: UserId, expected_hash: &str, new_hash: &str) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;
        Users::new(&mut conn).swap_password_hash(id, expected_hash, new_hash).await
    }

    async fn promote_to_admin(&self, id: UserId, password_hash: Option<&str>) -> Result<UserDBResponse> {
        let mut conn = self.pool.acquire().await?;
        Users::new(&mut conn).promote_to_admin(id, password_hash).await
    }

    #[instrument(skip(self, key_digest), fields(user_id = %abbrev_uuid(&user_id)), err)]
    async fn issue_token(&self, user_id: UserId, key_digest: &str) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        AuthTokens::new(&mut conn).upsert(user_id, key_digest).await?;
        Ok(())
    }

    async fn user_for_token(&self, key_digest: &str) -> Result<Option<UserDBResponse>> {
        let mut tx = self.pool.begin().await?;
        let Some(token) = AuthTokens::new(&mut tx).get_by_digest(key_digest).await? else {
            return Ok(None);
        };
        let user = Users::new(&mut tx).get_by_id(token.user_id).await?;
        tx.commit().await?;
        Ok(user)
    }

    async fn revoke_token(&self, user_id: UserId) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;
        AuthTokens::new(&mut conn).delete_for_user(user_id).await
    }
}
