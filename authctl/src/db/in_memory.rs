//! In-memory account store.
//!
//! Keeps users and tokens in process memory behind a single lock. Suitable for tests and local
//! development; everything is lost on restart. Each operation holds the write lock across its
//! check and its write, so uniqueness and compare-and-swap behave as they do in PostgreSQL.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::AccountStore;
use crate::db::{
    errors::{DbError, Result},
    handlers::UserFilter,
    models::users::{ProfileUpdateDBRequest, UserCreateDBRequest, UserDBResponse},
};
use crate::types::UserId;

#[derive(Default)]
struct State {
    users: HashMap<UserId, UserDBResponse>,
    /// user id -> token digest
    tokens: HashMap<UserId, String>,
}

impl State {
    fn unique_violation(constraint: &str) -> DbError {
        DbError::UniqueViolation {
            constraint: Some(constraint.to_string()),
            table: Some("users".to_string()),
            message: format!("duplicate key value violates unique constraint \"{constraint}\""),
        }
    }

    fn insert_user(&mut self, request: &UserCreateDBRequest) -> Result<UserDBResponse> {
        if self.users.values().any(|u| u.username == request.username) {
            return Err(Self::unique_violation("users_username_key"));
        }
        if self.users.values().any(|u| u.email == request.email) {
            return Err(Self::unique_violation("users_email_key"));
        }

        let now = Utc::now();
        let user = UserDBResponse {
            id: Uuid::new_v4(),
            username: request.username.clone(),
            email: request.email.clone(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            phone_number: request.phone_number.clone(),
            date_of_birth: request.date_of_birth,
            profile_picture: request.profile_picture.clone(),
            is_verified: request.is_verified,
            is_staff: request.is_staff,
            password_hash: request.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }
}

/// [`AccountStore`] backed by process memory.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AccountStore for InMemoryStore {
    async fn create_user_with_token(&self, request: &UserCreateDBRequest, key_digest: &str) -> Result<UserDBResponse> {
        let mut state = self.state.write().await;
        let user = state.insert_user(request)?;
        state.tokens.insert(user.id, key_digest.to_string());
        Ok(user)
    }

    async fn create_user(&self, request: &UserCreateDBRequest) -> Result<UserDBResponse> {
        self.state.write().await.insert_user(request)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<UserDBResponse>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserDBResponse>> {
        Ok(self.state.read().await.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<UserDBResponse>> {
        let state = self.state.read().await;
        let mut users: Vec<_> = state.users.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(users
            .into_iter()
            .skip(filter.skip.max(0) as usize)
            .take(filter.limit.max(0) as usize)
            .collect())
    }

    async fn update_profile(&self, id: UserId, request: &ProfileUpdateDBRequest) -> Result<UserDBResponse> {
        let mut state = self.state.write().await;
        let user = state.users.get_mut(&id).ok_or(DbError::NotFound)?;
        if let Some(first_name) = &request.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &request.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(phone_number) = &request.phone_number {
            user.phone_number = phone_number.clone();
        }
        if let Some(date_of_birth) = request.date_of_birth {
            user.date_of_birth = date_of_birth;
        }
        if let Some(profile_picture) = &request.profile_picture {
            user.profile_picture = profile_picture.clone();
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn swap_password_hash(&self, id: UserId, expected_hash: &str, new_hash: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        match state.users.get_mut(&id) {
            Some(user) if user.password_hash.as_deref() == Some(expected_hash) => {
                user.password_hash = Some(new_hash.to_string());
                user.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn promote_to_admin(&self, id: UserId, password_hash: Option<&str>) -> Result<UserDBResponse> {
        let mut state = self.state.write().await;
        let user = state.users.get_mut(&id).ok_or(DbError::NotFound)?;
        user.is_staff = true;
        user.is_verified = true;
        if let Some(hash) = password_hash {
            user.password_hash = Some(hash.to_string());
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn issue_token(&self, user_id: UserId, key_digest: &str) -> Result<()> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&user_id) {
            return Err(DbError::ForeignKeyViolation {
                constraint: Some("auth_tokens_user_id_fkey".to_string()),
                table: Some("auth_tokens".to_string()),
                message: "token for unknown user".to_string(),
            });
        }
        state.tokens.insert(user_id, key_digest.to_string());
        Ok(())
    }

    async fn user_for_token(&self, key_digest: &str) -> Result<Option<UserDBResponse>> {
        let state = self.state.read().await;
        Ok(state
            .tokens
            .iter()
            .find(|(_, digest)| digest.as_str() == key_digest)
            .and_then(|(user_id, _)| state.users.get(user_id))
            .cloned())
    }

    async fn revoke_token(&self, user_id: UserId) -> Result<bool> {
        Ok(self.state.write().await.tokens.remove(&user_id).is_some())
    }
}
