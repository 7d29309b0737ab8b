//! OpenAPI documentation, served with Scalar at `/docs`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

use crate::api;
use crate::validation::FieldErrors;

/// Security scheme for the session token header.
struct TokenSecurityAddon;

impl Modify for TokenSecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "TokenAuth".to_string(),
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "Authorization",
                    "Session token from register or login:\n\n```\nAuthorization: Token YOUR_TOKEN\n```",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&TokenSecurityAddon),
    paths(
        api::handlers::auth::register,
        api::handlers::auth::login,
        api::handlers::auth::logout,
        api::handlers::auth::change_password,
        api::handlers::users::get_profile,
        api::handlers::users::update_profile,
        api::handlers::users::list_users,
    ),
    components(schemas(
        api::models::auth::RegisterRequest,
        api::models::auth::LoginRequest,
        api::models::auth::ChangePasswordRequest,
        api::models::auth::AuthResponse,
        api::models::auth::MessageResponse,
        api::models::users::UserResponse,
        api::models::users::ProfileUpdateRequest,
        FieldErrors,
    )),
    tags(
        (name = "authentication", description = "Registration, login, logout and password change"),
        (name = "users", description = "Profiles and user listing"),
    ),
    info(
        title = "authctl",
        description = "User accounts: registration, token sessions, profiles and authorization rules",
    )
)]
pub struct ApiDoc;
