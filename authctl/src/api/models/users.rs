//! API request/response models for users.

use crate::db::models::users::UserDBResponse;
use crate::types::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// "first last", trimmed
    pub full_name: String,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub profile_picture: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserDBResponse> for UserResponse {
    fn from(db: UserDBResponse) -> Self {
        let full_name = format!("{} {}", db.first_name, db.last_name).trim().to_string();
        Self {
            id: db.id,
            username: db.username,
            email: db.email,
            first_name: db.first_name,
            last_name: db.last_name,
            full_name,
            phone_number: db.phone_number,
            date_of_birth: db.date_of_birth,
            profile_picture: db.profile_picture,
            is_verified: db.is_verified,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// The authenticated user for the current request, resolved from its token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentUser {
    #[schema(value_type = String, format = "uuid")]
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub is_verified: bool,
}

impl From<UserDBResponse> for CurrentUser {
    fn from(db: UserDBResponse) -> Self {
        Self {
            id: db.id,
            username: db.username,
            email: db.email,
            is_staff: db.is_staff,
            is_verified: db.is_verified,
        }
    }
}

/// Profile update payload.
///
/// Read-only fields (`id`, `username`, `email`, `is_verified`, timestamps) are ignored if sent.
/// For the nullable fields, an explicit `null` is distinguished from an absent key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ProfileUpdateRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub phone_number: Option<Option<String>>,
    /// `YYYY-MM-DD`
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, format = Date)]
    pub date_of_birth: Option<Option<String>>,
    /// Picture reference (URL or storage path)
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub profile_picture: Option<Option<String>>,
}

/// Maps a present key to `Some(value)`, so `null` becomes `Some(None)` and an absent key stays
/// `None` through `#[serde(default)]`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn db_user(first: &str, last: &str) -> UserDBResponse {
        UserDBResponse {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone_number: None,
            date_of_birth: None,
            profile_picture: None,
            is_verified: false,
            is_staff: true,
            password_hash: Some("$argon2id$secret".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_full_name_is_trimmed() {
        assert_eq!(UserResponse::from(db_user("Alice", "Smith")).full_name, "Alice Smith");
        assert_eq!(UserResponse::from(db_user("Alice", "")).full_name, "Alice");
        assert_eq!(UserResponse::from(db_user("", "")).full_name, "");
    }

    #[test]
    fn test_user_view_hides_secrets_and_staff_flag() {
        let json = serde_json::to_value(UserResponse::from(db_user("Alice", "Smith"))).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("password_hash"));
        assert!(!object.contains_key("is_staff"));
        assert!(object.contains_key("full_name"));
    }

    #[test]
    fn test_profile_update_distinguishes_null_from_absent() {
        let request: ProfileUpdateRequest = serde_json::from_str(r#"{"first_name": "A", "phone_number": null}"#).unwrap();
        assert_eq!(request.first_name.as_deref(), Some("A"));
        assert_eq!(request.phone_number, Some(None));
        assert_eq!(request.date_of_birth, None);

        // Read-only fields are ignored
        let request: ProfileUpdateRequest = serde_json::from_str(r#"{"username": "mallory", "is_verified": true}"#).unwrap();
        assert!(request.first_name.is_none());
    }
}
