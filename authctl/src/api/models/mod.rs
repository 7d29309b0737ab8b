//! API request and response data models.
//!
//! API models are distinct from database models: responses never carry password hashes or
//! staff flags, and requests only expose the fields a client may write.
//!
//! - [`auth`]: registration, login, logout and password change payloads
//! - [`users`]: the public user view, the current user and profile updates
//! - [`pagination`]: `skip`/`limit` query parameters

pub mod auth;
pub mod pagination;
pub mod users;
