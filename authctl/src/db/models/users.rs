//! Database models for users.

use crate::auth::permissions::Owned;
use crate::types::UserId;
use chrono::{DateTime, NaiveDate, Utc};

/// Database request for creating a new user
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub profile_picture: Option<String>,
    pub is_staff: bool,
    pub is_verified: bool,
    pub password_hash: Option<String>,
}

/// Profile columns written by an update.
///
/// `None` leaves a column as it is in the stored row at write time. For the nullable columns,
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdateDBRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<Option<String>>,
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub profile_picture: Option<Option<String>>,
}

impl ProfileUpdateDBRequest {
    /// An update that sets every column, clearing all of them.
    pub fn cleared() -> Self {
        Self {
            first_name: Some(String::new()),
            last_name: Some(String::new()),
            phone_number: Some(None),
            date_of_birth: Some(None),
            profile_picture: Some(None),
        }
    }
}

/// Database response for a user
#[derive(Debug, Clone)]
pub struct UserDBResponse {
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

/// A user record is owned by the user it describes.
impl Owned for UserDBResponse {
    fn owner_id(&self) -> UserId {
        self.id
    }
}
