//! HTTP API: handlers and their request/response models.
//!
//! All account routes live under `/api/auth`:
//!
//! - `POST /api/auth/register`, `POST /api/auth/login`, `POST /api/auth/logout`
//! - `GET /api/auth/profile`, `PUT|PATCH /api/auth/profile/update`
//! - `PUT|PATCH /api/auth/change-password`
//! - `GET /api/auth/users` (staff only)

pub mod extract;
pub mod handlers;
pub mod models;
