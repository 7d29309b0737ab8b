//! Database repository for users.

use crate::types::{UserId, abbrev_uuid};
use crate::db::{
    errors::{DbError, Result},
    models::users::{ProfileUpdateDBRequest, UserCreateDBRequest, UserDBResponse},
};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, email, first_name, last_name, phone_number, date_of_birth, profile_picture, \
                            is_verified, is_staff, password_hash, created_at, updated_at";

/// Filter for listing users
#[derive(Debug, Clone)]
pub struct UserFilter {
    pub skip: i64,
    pub limit: i64,
}

impl UserFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }
}

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub profile_picture: Option<String>,
    pub is_verified: bool,
    pub is_staff: bool,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDBResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            date_of_birth: user.date_of_birth,
            profile_picture: user.profile_picture,
            is_verified: user.is_verified,
            is_staff: user.is_staff,
            password_hash: user.password_hash,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

pub struct Users<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Users<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(username = %request.username), err)]
    pub async fn create(&mut self, request: &UserCreateDBRequest) -> Result<UserDBResponse> {
        // Always generate a new ID for users
        let user_id = Uuid::new_v4();

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, username, email, first_name, last_name, phone_number, date_of_birth, profile_picture,
                               is_verified, is_staff, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&request.username)
        .bind(&request.email)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.phone_number)
        .bind(request.date_of_birth)
        .bind(&request.profile_picture)
        .bind(request.is_verified)
        .bind(request.is_staff)
        .bind(&request.password_hash)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(user.into())
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&id)), err)]
    pub async fn get_by_id(&mut self, id: UserId) -> Result<Option<UserDBResponse>> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(user.map(Into::into))
    }

    /// Newest first, ties broken by id.
    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    pub async fn list(&mut self, filter: &UserFilter) -> Result<Vec<UserDBResponse>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id LIMIT $1 OFFSET $2"
        ))
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(users.into_iter().map(Into::into).collect())
    }

    /// Write the columns present in `request`.
    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&id)), err)]
    pub async fn update(&mut self, id: UserId, request: &ProfileUpdateDBRequest) -> Result<UserDBResponse> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                phone_number = CASE WHEN $4 THEN $5 ELSE phone_number END,
                date_of_birth = CASE WHEN $6 THEN $7 ELSE date_of_birth END,
                profile_picture = CASE WHEN $8 THEN $9 ELSE profile_picture END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(request.phone_number.is_some())
        .bind(request.phone_number.clone().flatten())
        .bind(request.date_of_birth.is_some())
        .bind(request.date_of_birth.flatten())
        .bind(request.profile_picture.is_some())
        .bind(request.profile_picture.clone().flatten())
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(user.into())
    }

    #[instrument(skip(self, email), err)]
    pub async fn get_user_by_email(&mut self, email: &str) -> Result<Option<UserDBResponse>> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(user.map(Into::into))
    }

    /// Replace the password hash only if it still equals `expected_hash`.
    ///
    /// Returns false when the row is gone or the hash changed since it was read.
    #[instrument(skip(self, expected_hash, new_hash), fields(user_id = %abbrev_uuid(&id)), err)]
    pub async fn swap_password_hash(&mut self, id: UserId, expected_hash: &str, new_hash: &str) -> Result<bool> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $3, updated_at = NOW() WHERE id = $1 AND password_hash = $2")
                .bind(id)
                .bind(expected_hash)
                .bind(new_hash)
                .execute(&mut *self.db)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Mark a user as a verified staff member, optionally resetting the password.
    #[instrument(skip(self, password_hash), fields(user_id = %abbrev_uuid(&id)), err)]
    pub async fn promote_to_admin(&mut self, id: UserId, password_hash: Option<&str>) -> Result<UserDBResponse> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET
                is_staff = TRUE,
                is_verified = TRUE,
                password_hash = COALESCE($2, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(password_hash)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(user.into())
    }
}
