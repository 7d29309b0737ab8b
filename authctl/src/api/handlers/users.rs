//! Profile and user listing endpoints.

use axum::{
    Json,
    extract::{Query, State},
    http::Method,
};

use crate::{
    AppState,
    api::extract::JsonBody,
    api::models::{
        pagination::Pagination,
        users::{CurrentUser, ProfileUpdateRequest, UserResponse},
    },
    auth::{
        accounts::UpdateMode,
        permissions::{Actor, Policy, require},
    },
    errors::Error,
};

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = "users",
    responses(
        (status = 200, description = "Current user's profile", body = UserResponse),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("TokenAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_profile(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<UserResponse>, Error> {
    let user = state.accounts().profile(current_user.id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update the current user's profile
///
/// `PATCH` changes only the supplied fields. `PUT` replaces every mutable field and clears
/// those that are omitted.
#[utoipa::path(
    patch,
    path = "/api/auth/profile/update",
    request_body = ProfileUpdateRequest,
    tag = "users",
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Field errors, keyed by field name"),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("TokenAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_profile(
    State(state): State<AppState>,
    method: Method,
    current_user: CurrentUser,
    JsonBody(request): JsonBody<ProfileUpdateRequest>,
) -> Result<Json<UserResponse>, Error> {
    let accounts = state.accounts();
    let user = accounts.profile(current_user.id).await?;
    require(&Policy::OwnerOrReadOnly, &Actor::from(&current_user), &method, Some(&user))?;

    let updated = accounts.update_profile(&user, request, UpdateMode::for_method(&method)).await?;
    Ok(Json(UserResponse::from(updated)))
}

/// List all users, newest first (staff only)
#[utoipa::path(
    get,
    path = "/api/auth/users",
    tag = "users",
    params(Pagination),
    responses(
        (status = 200, description = "Users, newest first", body = [UserResponse]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not a staff user"),
    ),
    security(("TokenAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    method: Method,
    actor: Actor,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<UserResponse>>, Error> {
    require(&Policy::AdminOnly, &actor, &method, None)?;

    let users = state.accounts().list_users(&pagination).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
