//! Registration, login, logout and password change.

use axum::{Json, extract::State, http::Method};

use crate::{
    AppState,
    api::extract::JsonBody,
    api::models::{
        auth::{AuthResponse, ChangePasswordRequest, LoginRequest, MessageResponse, RegisterRequest, RegisterResponse},
        users::{CurrentUser, UserResponse},
    },
    auth::permissions::{Actor, Policy, require},
    errors::Error,
};

/// Register a new user account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    tag = "authentication",
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Field errors, keyed by field name"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn register(State(state): State<AppState>, JsonBody(request): JsonBody<RegisterRequest>) -> Result<RegisterResponse, Error> {
    let session = state.accounts().register(request).await?;

    Ok(RegisterResponse(AuthResponse {
        user: UserResponse::from(session.user),
        token: session.token,
        message: "User registered successfully".to_string(),
    }))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    tag = "authentication",
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Email or password missing"),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, JsonBody(request): JsonBody<LoginRequest>) -> Result<Json<AuthResponse>, Error> {
    let session = state.accounts().login(request).await?;

    Ok(Json(AuthResponse {
        user: UserResponse::from(session.user),
        token: session.token,
        message: "Login successful".to_string(),
    }))
}

/// Logout: revoke the current session token
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "authentication",
    responses(
        (status = 200, description = "Logout successful", body = MessageResponse),
        (status = 400, description = "Error logging out"),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("TokenAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<MessageResponse>, Error> {
    state.accounts().logout(current_user.id).await?;
    Ok(MessageResponse::new("Logout successful"))
}

/// Change the current user's password
#[utoipa::path(
    put,
    path = "/api/auth/change-password",
    request_body = ChangePasswordRequest,
    tag = "authentication",
    responses(
        (status = 200, description = "Password changed successfully", body = MessageResponse),
        (status = 400, description = "Field errors, or the old password is incorrect"),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("TokenAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn change_password(
    State(state): State<AppState>,
    method: Method,
    current_user: CurrentUser,
    JsonBody(request): JsonBody<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, Error> {
    let accounts = state.accounts();
    let user = accounts.profile(current_user.id).await?;
    require(&Policy::OwnerOnly, &Actor::from(&current_user), &method, Some(&user))?;

    accounts.change_password(user.id, request).await?;
    Ok(MessageResponse::new("Password changed successfully"))
}
