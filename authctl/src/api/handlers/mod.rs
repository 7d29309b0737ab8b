//! HTTP request handlers for the account API.
//!
//! - [`auth`]: registration, login, logout and password change
//! - [`users`]: the current user's profile and the staff-only user listing

pub mod auth;
pub mod users;
