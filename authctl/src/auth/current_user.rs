//! Request extractors for the authenticated user and the requesting actor.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{instrument, trace};

use crate::{
    AppState,
    api::models::users::CurrentUser,
    auth::{permissions::Actor, session},
    errors::{Error, Result},
};

/// Resolve the `Authorization` token, if any.
///
/// Returns:
/// - None: no token presented
/// - Some(Ok(user)): token resolved to a user
/// - Some(Err(error)): token presented but unknown
async fn try_token_auth(parts: &Parts, state: &AppState) -> Option<Result<CurrentUser>> {
    let token = session::token_from_headers(&parts.headers)?;
    Some(state.accounts().authenticate(token).await)
}

/// Requires a valid token; rejects with 401 otherwise.
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip_all)]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        match try_token_auth(parts, state).await {
            Some(result) => result,
            None => {
                trace!("No token presented");
                Err(Error::Unauthenticated { message: None })
            }
        }
    }
}

/// The requester for permission checks: anonymous when no token is presented.
///
/// A presented but unknown token is still rejected with 401.
impl FromRequestParts<AppState> for Actor {
    type Rejection = Error;

    #[instrument(skip_all)]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        match try_token_auth(parts, state).await {
            Some(result) => result.map(|user| Actor::from(&user)),
            None => Ok(Actor::anonymous()),
        }
    }
}
