//! Request and response models for registration, login and password management.
//!
//! Request fields are optional at the type level so that a missing field is reported as a
//! field-level validation error instead of a deserialization failure.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::models::users::UserResponse;

/// Request to register a new user
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Username (unique; letters, digits and @/./+/-/_)
    pub username: Option<String>,
    /// Email address (unique)
    pub email: Option<String>,
    pub password: Option<String>,
    /// Must equal `password`
    pub password_confirm: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    /// `YYYY-MM-DD`
    #[schema(format = Date)]
    pub date_of_birth: Option<String>,
}

/// Request to login
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request to change the current user's password
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
    /// Must equal `new_password`
    pub new_password_confirm: Option<String>,
}

/// Response after successful login or registration
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// User information
    pub user: UserResponse,
    /// Session token, sent back as `Authorization: Token <token>`
    pub token: String,
    /// Success message
    pub message: String,
}

/// Generic success response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self { message: message.into() })
    }
}

/// Registration succeeded: `201 Created` with the auth payload.
pub struct RegisterResponse(pub AuthResponse);

impl IntoResponse for RegisterResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}
