//! Account lifecycle: registration, login/logout, token resolution, profiles and passwords.
//!
//! [`Accounts`] validates each request with explicit pre-condition checks and delegates
//! persistence to an [`AccountStore`]. It performs no authorization of its own; handlers
//! screen requests with [`crate::auth::permissions`] first.

use axum::http::Method;
use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::{
    api::models::{
        auth::{ChangePasswordRequest, LoginRequest, RegisterRequest},
        pagination::Pagination,
        users::{CurrentUser, ProfileUpdateRequest},
    },
    auth::{
        password::{self, Argon2Params},
        session::{IssuedToken, token_digest},
    },
    config::Config,
    db::{
        handlers::UserFilter,
        models::users::{ProfileUpdateDBRequest, UserCreateDBRequest, UserDBResponse},
        store::AccountStore,
    },
    errors::{Error, Result},
    types::{UserId, abbrev_uuid},
    validation::{FieldErrors, NON_FIELD_ERRORS, is_valid_email, is_valid_username, normalize_email},
};

const USERNAME_MAX_LENGTH: usize = 150;
const EMAIL_MAX_LENGTH: usize = 254;
const NAME_MAX_LENGTH: usize = 150;
const PHONE_MAX_LENGTH: usize = 20;
const PICTURE_MAX_LENGTH: usize = 255;

/// A user together with the session token just issued for them.
#[derive(Debug)]
pub struct Session {
    pub user: UserDBResponse,
    pub token: String,
}

/// How a profile update treats fields missing from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Only supplied fields change (`PATCH`).
    Partial,
    /// Every mutable field is replaced; omitted ones are cleared (`PUT`).
    Replace,
}

impl UpdateMode {
    pub fn for_method(method: &Method) -> Self {
        if *method == Method::PATCH { Self::Partial } else { Self::Replace }
    }
}

pub struct Accounts<'a> {
    store: &'a dyn AccountStore,
    config: &'a Config,
}

impl<'a> Accounts<'a> {
    pub fn new(store: &'a dyn AccountStore, config: &'a Config) -> Self {
        Self { store, config }
    }

    fn argon2_params(&self) -> Argon2Params {
        Argon2Params::from(&self.config.auth.native.password)
    }

    /// Create a user and issue its first token. Nothing is created if any check fails.
    #[instrument(skip_all, err)]
    pub async fn register(&self, request: RegisterRequest) -> Result<Session> {
        if !self.config.auth.native.allow_registration {
            return Err(Error::BadRequest {
                message: "User registration is disabled".to_string(),
            });
        }

        let mut errors = FieldErrors::new();

        let username = errors.require("username", request.username.as_deref());
        if let Some(username) = username {
            errors.max_length("username", username, USERNAME_MAX_LENGTH);
            if !is_valid_username(username) {
                errors.add(
                    "username",
                    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
                );
            }
        }

        let email = errors.require("email", request.email.as_deref());
        if let Some(email) = email {
            errors.max_length("email", email, EMAIL_MAX_LENGTH);
            if !is_valid_email(email) {
                errors.add("email", "Enter a valid email address.");
            }
        }

        let password = errors.require_exact("password", request.password.as_deref());
        if let Some(password) = password {
            password::check_password_policy(&mut errors, "password", password, &self.config.auth.native.password);
        }
        let password_confirm = errors.require_exact("password_confirm", request.password_confirm.as_deref());

        let first_name = optional_text(&mut errors, "first_name", request.first_name.as_deref(), NAME_MAX_LENGTH).unwrap_or_default();
        let last_name = optional_text(&mut errors, "last_name", request.last_name.as_deref(), NAME_MAX_LENGTH).unwrap_or_default();
        let phone_number = optional_text(&mut errors, "phone_number", request.phone_number.as_deref(), PHONE_MAX_LENGTH);
        let date_of_birth = optional_date(&mut errors, "date_of_birth", request.date_of_birth.as_deref());

        let (Some(username), Some(email), Some(password), Some(password_confirm)) = (username, email, password, password_confirm) else {
            return Err(errors.into());
        };
        errors.into_result()?;

        if password != password_confirm {
            return Err(FieldErrors::single(NON_FIELD_ERRORS, "Passwords don't match").into());
        }

        let password_hash = password::hash_password_blocking(password.to_string(), self.argon2_params()).await?;
        let create_request = UserCreateDBRequest {
            username: username.to_string(),
            email: normalize_email(email),
            first_name,
            last_name,
            phone_number,
            date_of_birth,
            profile_picture: None,
            is_staff: false,
            is_verified: false,
            password_hash: Some(password_hash),
        };

        let token = IssuedToken::generate();
        let user = self.store.create_user_with_token(&create_request, &token.digest).await?;
        info!(user_id = %abbrev_uuid(&user.id), "Registered user");

        Ok(Session { user, token: token.key })
    }

    /// Check credentials and issue a fresh token, replacing any previous one.
    ///
    /// Unknown email, a user without a password and a wrong password fail identically.
    #[instrument(skip_all, err)]
    pub async fn login(&self, request: LoginRequest) -> Result<Session> {
        let email = request.email.as_deref().map(str::trim).filter(|e| !e.is_empty());
        let password = request.password.as_deref().filter(|p| !p.is_empty());
        let (Some(email), Some(password)) = (email, password) else {
            return Err(Error::BadRequest {
                message: "Email and password are required".to_string(),
            });
        };

        let user = self.store.get_user_by_email(&normalize_email(email)).await?;
        let password_hash = user.as_ref().and_then(|user| user.password_hash.clone());

        let verified = match password_hash {
            Some(hash) => password::verify_password_blocking(password.to_string(), hash).await?,
            None => password::reject_without_hash_blocking(password.to_string(), self.argon2_params()).await?,
        };
        let Some(user) = user.filter(|_| verified) else {
            return Err(Error::InvalidCredentials);
        };

        let token = IssuedToken::generate();
        self.store.issue_token(user.id, &token.digest).await?;
        info!(user_id = %abbrev_uuid(&user.id), "User logged in");

        Ok(Session { user, token: token.key })
    }

    /// Delete the user's token. Fails with a generic error when there is none.
    #[instrument(skip_all, fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn logout(&self, user_id: UserId) -> Result<()> {
        if !self.store.revoke_token(user_id).await? {
            return Err(Error::LogoutFailed);
        }
        info!(user_id = %abbrev_uuid(&user_id), "User logged out");
        Ok(())
    }

    /// Resolve a presented token to its user.
    #[instrument(skip_all, err)]
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser> {
        self.store
            .user_for_token(&token_digest(token))
            .await?
            .map(CurrentUser::from)
            .ok_or_else(|| Error::Unauthenticated {
                message: Some("Invalid token.".to_string()),
            })
    }

    pub async fn profile(&self, user_id: UserId) -> Result<UserDBResponse> {
        self.store.get_user(user_id).await?.ok_or(Error::Unauthenticated { message: None })
    }

    /// Apply a profile update to `user`.
    #[instrument(skip_all, fields(user_id = %abbrev_uuid(&user.id), ?mode), err)]
    pub async fn update_profile(&self, user: &UserDBResponse, request: ProfileUpdateRequest, mode: UpdateMode) -> Result<UserDBResponse> {
        // Only supplied columns are written, so concurrent PATCHes to different fields both land
        let mut profile = match mode {
            UpdateMode::Partial => ProfileUpdateDBRequest::default(),
            UpdateMode::Replace => ProfileUpdateDBRequest::cleared(),
        };

        let mut errors = FieldErrors::new();
        if let Some(first_name) = request.first_name.as_deref() {
            profile.first_name = Some(optional_text(&mut errors, "first_name", Some(first_name), NAME_MAX_LENGTH).unwrap_or_default());
        }
        if let Some(last_name) = request.last_name.as_deref() {
            profile.last_name = Some(optional_text(&mut errors, "last_name", Some(last_name), NAME_MAX_LENGTH).unwrap_or_default());
        }
        if let Some(phone_number) = request.phone_number {
            profile.phone_number = Some(optional_text(&mut errors, "phone_number", phone_number.as_deref(), PHONE_MAX_LENGTH));
        }
        if let Some(date_of_birth) = request.date_of_birth {
            profile.date_of_birth = Some(optional_date(&mut errors, "date_of_birth", date_of_birth.as_deref()));
        }
        if let Some(profile_picture) = request.profile_picture {
            profile.profile_picture = Some(optional_text(&mut errors, "profile_picture", profile_picture.as_deref(), PICTURE_MAX_LENGTH));
        }
        errors.into_result()?;

        Ok(self.store.update_profile(user.id, &profile).await?)
    }

    /// Replace the password after verifying the current one.
    ///
    /// The write only succeeds if the stored hash is still the one that was verified. The
    /// user's session token is left in place.
    #[instrument(skip_all, fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn change_password(&self, user_id: UserId, request: ChangePasswordRequest) -> Result<()> {
        let mut errors = FieldErrors::new();
        let old_password = errors.require_exact("old_password", request.old_password.as_deref());
        let new_password = errors.require_exact("new_password", request.new_password.as_deref());
        if let Some(new_password) = new_password {
            password::check_password_policy(&mut errors, "new_password", new_password, &self.config.auth.native.password);
        }
        let new_password_confirm = errors.require_exact("new_password_confirm", request.new_password_confirm.as_deref());

        let (Some(old_password), Some(new_password), Some(new_password_confirm)) = (old_password, new_password, new_password_confirm)
        else {
            return Err(errors.into());
        };
        errors.into_result()?;

        if new_password != new_password_confirm {
            return Err(FieldErrors::single(NON_FIELD_ERRORS, "New passwords don't match").into());
        }

        let user = self.profile(user_id).await?;
        let current_hash = user.password_hash.ok_or(Error::IncorrectPassword)?;
        if !password::verify_password_blocking(old_password.to_string(), current_hash.clone()).await? {
            return Err(Error::IncorrectPassword);
        }

        let new_hash = password::hash_password_blocking(new_password.to_string(), self.argon2_params()).await?;
        if !self.store.swap_password_hash(user_id, &current_hash, &new_hash).await? {
            // Changed concurrently since it was verified
            return Err(Error::IncorrectPassword);
        }
        info!(user_id = %abbrev_uuid(&user_id), "Password changed");

        Ok(())
    }

    /// Every user, newest first.
    pub async fn list_users(&self, pagination: &Pagination) -> Result<Vec<UserDBResponse>> {
        Ok(self
            .store
            .list_users(&UserFilter::new(pagination.skip(), pagination.limit()))
            .await?)
    }

    /// Ensure a verified staff user with `email` exists, setting its password when given.
    #[instrument(skip(self, password), err)]
    pub async fn ensure_admin(&self, email: &str, password: Option<&str>) -> Result<UserDBResponse> {
        let email = normalize_email(email);
        let password_hash = match password {
            Some(password) => Some(password::hash_password_blocking(password.to_string(), self.argon2_params()).await?),
            None => None,
        };

        let user = match self.store.get_user_by_email(&email).await? {
            Some(existing) => self.store.promote_to_admin(existing.id, password_hash.as_deref()).await?,
            None => {
                self.store
                    .create_user(&UserCreateDBRequest {
                        username: email.clone(),
                        email,
                        first_name: String::new(),
                        last_name: String::new(),
                        phone_number: None,
                        date_of_birth: None,
                        profile_picture: None,
                        is_staff: true,
                        is_verified: true,
                        password_hash,
                    })
                    .await?
            }
        };

        Ok(user)
    }
}

/// Trimmed optional text: blank becomes `None`, over-long values are recorded as errors.
fn optional_text(errors: &mut FieldErrors, field: &str, value: Option<&str>, max: usize) -> Option<String> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    errors.max_length(field, value, max);
    Some(value.to_string())
}

/// Optional `YYYY-MM-DD` date: blank becomes `None`, unparsable values are recorded as errors.
fn optional_date(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<NaiveDate> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::in_memory::InMemoryStore;
    use crate::test_utils::{register_request, test_config, user_create_request};

    #[tokio::test]
    async fn test_register_then_login_resolves_same_identity() {
        let store = InMemoryStore::new();
        let config = test_config();
        let accounts = Accounts::new(&store, &config);

        let registered = accounts.register(register_request("alice", "alice@x.com", "longpass1")).await.unwrap();
        assert_eq!(registered.user.username, "alice");
        assert!(!registered.user.is_staff);
        assert!(!registered.user.is_verified);
        assert_eq!(accounts.authenticate(&registered.token).await.unwrap().id, registered.user.id);

        let logged_in = accounts
            .login(LoginRequest {
                email: Some("alice@x.com".to_string()),
                password: Some("longpass1".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);

        // Login rotates the token
        assert_ne!(logged_in.token, registered.token);
        assert!(accounts.authenticate(&registered.token).await.is_err());
        assert_eq!(accounts.authenticate(&logged_in.token).await.unwrap().id, registered.user.id);
    }

    #[tokio::test]
    async fn test_register_mismatched_passwords_creates_nothing() {
        let store = InMemoryStore::new();
        let config = test_config();
        let accounts = Accounts::new(&store, &config);

        let mut request = register_request("alice", "alice@x.com", "longpass1");
        request.password_confirm = Some("longpass2".to_string());

        match accounts.register(request).await.unwrap_err() {
            Error::Validation { errors } => {
                assert_eq!(errors.get(NON_FIELD_ERRORS).unwrap(), ["Passwords don't match"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(accounts.list_users(&Pagination::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_collects_field_errors() {
        let store = InMemoryStore::new();
        let config = test_config();
        let accounts = Accounts::new(&store, &config);

        let request = RegisterRequest {
            username: Some("bad name!".to_string()),
            email: Some("not-an-email".to_string()),
            password: Some("short".to_string()),
            password_confirm: None,
            phone_number: Some("1".repeat(21)),
            date_of_birth: Some("01/02/1990".to_string()),
            ..Default::default()
        };

        let Error::Validation { errors } = accounts.register(request).await.unwrap_err() else {
            panic!("expected validation error");
        };
        for field in ["username", "email", "password", "password_confirm", "phone_number", "date_of_birth"] {
            assert!(errors.contains(field), "missing error for {field}");
        }
        // Confirmation mismatch is only checked once fields are valid
        assert!(!errors.contains(NON_FIELD_ERRORS));
        assert!(accounts.list_users(&Pagination::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_field_error() {
        let store = InMemoryStore::new();
        let config = test_config();
        let accounts = Accounts::new(&store, &config);

        accounts.register(register_request("alice", "alice@x.com", "longpass1")).await.unwrap();
        let err = accounts
            .register(register_request("alice2", "alice@X.COM", "longpass1"))
            .await
            .unwrap_err();
        assert_eq!(err.field_errors().unwrap().get("email").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_disabled() {
        let store = InMemoryStore::new();
        let mut config = test_config();
        config.auth.native.allow_registration = false;
        let accounts = Accounts::new(&store, &config);

        let err = accounts.register(register_request("alice", "alice@x.com", "longpass1")).await.unwrap_err();
        assert!(matches!(err, Error::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let store = InMemoryStore::new();
        let config = test_config();
        let accounts = Accounts::new(&store, &config);
        accounts.register(register_request("alice", "alice@x.com", "longpass1")).await.unwrap();

        let wrong_password = accounts
            .login(LoginRequest {
                email: Some("alice@x.com".to_string()),
                password: Some("wrongpass".to_string()),
            })
            .await
            .unwrap_err();
        let unknown_email = accounts
            .login(LoginRequest {
                email: Some("nobody@x.com".to_string()),
                password: Some("longpass1".to_string()),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, Error::InvalidCredentials));
        assert!(matches!(unknown_email, Error::InvalidCredentials));
        assert_eq!(wrong_password.user_message(), unknown_email.user_message());
        assert_eq!(wrong_password.status_code(), unknown_email.status_code());
    }

    #[tokio::test]
    async fn test_login_user_without_password_is_rejected() {
        let store = InMemoryStore::new();
        let config = test_config();
        let accounts = Accounts::new(&store, &config);

        store.create_user(&user_create_request("nopass", "nopass@x.com", None)).await.unwrap();

        let err = accounts
            .login(LoginRequest {
                email: Some("nopass@x.com".to_string()),
                password: Some("longpass1".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let store = InMemoryStore::new();
        let config = test_config();
        let accounts = Accounts::new(&store, &config);

        let err = accounts
            .login(LoginRequest {
                email: Some("alice@x.com".to_string()),
                password: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Email and password are required");
    }

    #[tokio::test]
    async fn test_logout_deletes_token_and_second_logout_fails() {
        let store = InMemoryStore::new();
        let config = test_config();
        let accounts = Accounts::new(&store, &config);
        let session = accounts.register(register_request("alice", "alice@x.com", "longpass1")).await.unwrap();

        accounts.logout(session.user.id).await.unwrap();
        assert!(matches!(accounts.authenticate(&session.token).await.unwrap_err(), Error::Unauthenticated { .. }));
        assert!(matches!(accounts.logout(session.user.id).await.unwrap_err(), Error::LogoutFailed));
    }

    #[tokio::test]
    async fn test_change_password() {
        let store = InMemoryStore::new();
        let config = test_config();
        let accounts = Accounts::new(&store, &config);
        let session = accounts.register(register_request("alice", "alice@x.com", "longpass1")).await.unwrap();
        let original_hash = session.user.password_hash.clone();

        // Wrong old password: hash unchanged
        let err = accounts
            .change_password(
                session.user.id,
                ChangePasswordRequest {
                    old_password: Some("wrongpass".to_string()),
                    new_password: Some("newpass123".to_string()),
                    new_password_confirm: Some("newpass123".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::IncorrectPassword));
        assert_eq!(accounts.profile(session.user.id).await.unwrap().password_hash, original_hash);

        // Mismatched confirmation: hash unchanged
        let err = accounts
            .change_password(
                session.user.id,
                ChangePasswordRequest {
                    old_password: Some("longpass1".to_string()),
                    new_password: Some("newpass123".to_string()),
                    new_password_confirm: Some("newpass124".to_string()),
                },
            )
            .await
            .unwrap_err();
        let Error::Validation { errors } = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get(NON_FIELD_ERRORS).unwrap(), ["New passwords don't match"]);
        assert_eq!(accounts.profile(session.user.id).await.unwrap().password_hash, original_hash);

        accounts
            .change_password(
                session.user.id,
                ChangePasswordRequest {
                    old_password: Some("longpass1".to_string()),
                    new_password: Some("newpass123".to_string()),
                    new_password_confirm: Some("newpass123".to_string()),
                },
            )
            .await
            .unwrap();

        // Existing token still valid; new password works, old one does not
        assert!(accounts.authenticate(&session.token).await.is_ok());
        let login = |password: &str| LoginRequest {
            email: Some("alice@x.com".to_string()),
            password: Some(password.to_string()),
        };
        assert!(accounts.login(login("newpass123")).await.is_ok());
        assert!(matches!(accounts.login(login("longpass1")).await.unwrap_err(), Error::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_update_profile_patch_and_put() {
        let store = InMemoryStore::new();
        let config = test_config();
        let accounts = Accounts::new(&store, &config);
        let mut request = register_request("alice", "alice@x.com", "longpass1");
        request.first_name = Some("Alice".to_string());
        request.phone_number = Some("+15550100".to_string());
        let session = accounts.register(request).await.unwrap();

        let patched = accounts
            .update_profile(
                &session.user,
                ProfileUpdateRequest {
                    last_name: Some("Smith".to_string()),
                    ..Default::default()
                },
                UpdateMode::Partial,
            )
            .await
            .unwrap();
        assert_eq!(patched.first_name, "Alice");
        assert_eq!(patched.last_name, "Smith");
        assert_eq!(patched.phone_number.as_deref(), Some("+15550100"));

        let replaced = accounts
            .update_profile(
                &patched,
                ProfileUpdateRequest {
                    first_name: Some("Al".to_string()),
                    date_of_birth: Some(Some("1990-02-01".to_string())),
                    ..Default::default()
                },
                UpdateMode::Replace,
            )
            .await
            .unwrap();
        assert_eq!(replaced.first_name, "Al");
        assert_eq!(replaced.last_name, "");
        assert_eq!(replaced.phone_number, None);
        assert_eq!(replaced.date_of_birth, NaiveDate::from_ymd_opt(1990, 2, 1));
        assert_eq!(replaced.username, "alice");
        assert_eq!(replaced.email, "alice@x.com");
    }

    #[tokio::test]
    async fn test_partial_updates_from_same_snapshot_both_apply() {
        let store = InMemoryStore::new();
        let config = test_config();
        let accounts = Accounts::new(&store, &config);
        let session = accounts.register(register_request("alice", "alice@x.com", "longpass1")).await.unwrap();
        let snapshot = session.user;

        accounts
            .update_profile(
                &snapshot,
                ProfileUpdateRequest {
                    first_name: Some("Alice".to_string()),
                    ..Default::default()
                },
                UpdateMode::Partial,
            )
            .await
            .unwrap();
        let second = accounts
            .update_profile(
                &snapshot,
                ProfileUpdateRequest {
                    phone_number: Some(Some("+15550100".to_string())),
                    ..Default::default()
                },
                UpdateMode::Partial,
            )
            .await
            .unwrap();

        assert_eq!(second.first_name, "Alice");
        assert_eq!(second.phone_number.as_deref(), Some("+15550100"));
    }

    #[tokio::test]
    async fn test_update_profile_validation_leaves_record_untouched() {
        let store = InMemoryStore::new();
        let config = test_config();
        let accounts = Accounts::new(&store, &config);
        let session = accounts.register(register_request("alice", "alice@x.com", "longpass1")).await.unwrap();

        let err = accounts
            .update_profile(
                &session.user,
                ProfileUpdateRequest {
                    first_name: Some("Alice".to_string()),
                    phone_number: Some(Some("1".repeat(21))),
                    ..Default::default()
                },
                UpdateMode::Partial,
            )
            .await
            .unwrap_err();
        assert!(err.field_errors().unwrap().contains("phone_number"));
        assert_eq!(accounts.profile(session.user.id).await.unwrap().first_name, "");
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() {
        let store = InMemoryStore::new();
        let config = test_config();
        let accounts = Accounts::new(&store, &config);

        let first = accounts.ensure_admin("admin@example.com", Some("adminpass1")).await.unwrap();
        assert!(first.is_staff && first.is_verified);

        let second = accounts.ensure_admin("admin@example.com", None).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(accounts.list_users(&Pagination::default()).await.unwrap().len(), 1);

        let session = accounts
            .login(LoginRequest {
                email: Some("admin@example.com".to_string()),
                password: Some("adminpass1".to_string()),
            })
            .await
            .unwrap();
        assert!(accounts.authenticate(&session.token).await.unwrap().is_staff);
    }

    #[test]
    fn test_update_mode_for_method() {
        assert_eq!(UpdateMode::for_method(&Method::PATCH), UpdateMode::Partial);
        assert_eq!(UpdateMode::for_method(&Method::PUT), UpdateMode::Replace);
    }
}
