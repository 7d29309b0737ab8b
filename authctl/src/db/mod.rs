//! Database layer for data persistence and access.
//!
//! ```text
//! ┌──────────────┐
//! │   Service    │  (auth::accounts)
//! └──────┬───────┘
//!        │
//!        ↓
//! ┌──────────────┐
//! │ AccountStore │  (db::store - PgStore / db::in_memory - InMemoryStore)
//! └──────┬───────┘
//!        │
//!        ↓
//! ┌──────────────┐
//! │ Repositories │  (db::handlers - queries)
//! └──────┬───────┘
//!        │
//!        ↓
//! ┌──────────────┐
//! │  PostgreSQL  │
//! └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`store`]: the [`store::AccountStore`] trait and its PostgreSQL implementation
//! - [`in_memory`]: in-memory implementation for tests and local development
//! - [`handlers`]: repository implementations over a connection or transaction
//! - [`models`]: database record structures matching table schemas
//! - [`errors`]: database-specific error types
//!
//! # Migrations
//!
//! Database migrations are managed by SQLx and located in the `migrations/` directory.
//! The [`crate::migrator`] function provides access to the migrator:
//!
//! ```ignore
//! authctl::migrator().run(&pool).await?;
//! ```

pub mod errors;
pub mod handlers;
pub mod in_memory;
pub mod models;
pub mod store;
