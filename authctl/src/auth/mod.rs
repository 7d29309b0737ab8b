//! Authentication and authorization.
//!
//! Clients authenticate with an opaque session token issued at registration or login and sent
//! as `Authorization: Token <key>` (`Bearer` is accepted too). The token resolves to a
//! [`CurrentUser`](crate::api::models::users::CurrentUser); handlers then screen the request with
//! the predicates in [`permissions`] before calling into [`accounts`].
//!
//! - [`accounts`]: registration, login/logout, profiles and password changes
//! - [`current_user`]: extractors for the authenticated user and the requesting actor
//! - [`password`]: Argon2id hashing, verification and length policy
//! - [`permissions`]: pure authorization predicates and their combinators
//! - [`session`]: token generation, digests and header parsing
//!
//! ```ignore
//! use authctl::api::models::users::CurrentUser;
//!
//! async fn protected_handler(current_user: CurrentUser) -> String {
//!     format!("Hello, {}!", current_user.username)
//! }
//! ```

pub mod accounts;
pub mod current_user;
pub mod password;
pub mod permissions;
pub mod session;
