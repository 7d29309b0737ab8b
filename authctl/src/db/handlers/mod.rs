//! Repositories for database access.
//!
//! Each repository wraps a SQLx connection or transaction, binds query parameters and returns
//! the plain records from [`crate::db::models`].
//!
//! - [`Users`]: user accounts, profile updates and password swaps
//! - [`AuthTokens`]: session token digests
//!
//! ```ignore
//! use authctl::db::handlers::{UserFilter, Users};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut tx = pool.begin().await?;
//!     let mut repo = Users::new(&mut tx);
//!     let users = repo.list(&UserFilter::new(0, 100)).await?;
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod auth_tokens;
pub mod users;

pub use auth_tokens::AuthTokens;
pub use users::{UserFilter, Users};
