//! Database record structures matching table schemas.

pub mod auth_tokens;
pub mod users;
