//! # authctl: user accounts service
//!
//! `authctl` is a small HTTP service that owns user accounts: self-registration, token based
//! login and logout, profile maintenance and password changes. Every mutating endpoint is
//! screened by declarative permission predicates before the account logic runs.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the HTTP layer and
//! persists accounts in PostgreSQL. For development and tests it can instead keep everything in
//! process memory (`database.type: in_memory`).
//!
//! ### Request Flow
//!
//! Requests to `/api/auth/*` carry an opaque token in the `Authorization: Token <key>` header.
//! The [`auth::current_user`] extractors resolve the token to a user (or an anonymous actor),
//! handlers check a [`auth::permissions::Policy`] against the actor and the target record, and
//! then delegate to [`auth::accounts::Accounts`], which validates the payload and talks to the
//! [`db::store::AccountStore`].
//!
//! ### Core Components
//!
//! - **API layer** ([`api`]): request/response models and handlers
//! - **Authentication layer** ([`auth`]): password hashing, tokens, permission predicates and the
//!   account service
//! - **Database layer** ([`db`]): repositories over PostgreSQL plus an in-memory store behind the
//!   same trait
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use authctl::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = authctl::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     authctl::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! Migrations run automatically on startup when an external database is configured:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::migrate::MigrateError> {
//! authctl::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod test_utils;

use crate::{
    auth::accounts::Accounts,
    config::{CorsOrigin, DatabaseConfig},
    db::{in_memory::InMemoryStore, store::AccountStore, store::PgStore},
    openapi::ApiDoc,
};
use axum::{
    Router,
    http::{self, HeaderValue},
    routing::{get, post, put},
};
use bon::Builder;
pub use config::Config;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::UserId;

/// Application state shared across all request handlers.
///
/// # Example
///
/// ```ignore
/// let state = AppState::builder()
///     .store(Arc::new(InMemoryStore::new()))
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub store: Arc<dyn AccountStore>,
    pub config: Config,
}

impl AppState {
    /// Account operations bound to this state's store and configuration.
    pub fn accounts(&self) -> Accounts<'_> {
        Accounts::new(self.store.as_ref(), &self.config)
    }
}

/// Get the authctl database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Ensure the configured admin user exists.
///
/// Idempotent: an existing user with `email` is promoted to a verified staff user (and gets
/// `password`, when given); otherwise a new one is created with the email as username.
#[instrument(skip_all)]
pub async fn create_initial_admin_user(email: &str, password: Option<&str>, state: &AppState) -> anyhow::Result<UserId> {
    let user = state
        .accounts()
        .ensure_admin(email, password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create initial admin user: {}", e))?;
    info!(user_id = %types::abbrev_uuid(&user.id), "Initial admin user ready");
    Ok(user.id)
}

/// Connect to the configured store, running migrations for PostgreSQL.
async fn setup_store(config: &Config) -> anyhow::Result<(Arc<dyn AccountStore>, Option<PgPool>)> {
    match &config.database {
        DatabaseConfig::External { url, pool } => {
            info!("Using external database");
            let db = PgPoolOptions::new()
                .max_connections(pool.max_connections)
                .min_connections(pool.min_connections)
                .acquire_timeout(pool.acquire_timeout)
                .idle_timeout(pool.idle_timeout)
                .connect(url)
                .await?;
            migrator().run(&db).await?;
            Ok((Arc::new(PgStore::new(db.clone())), Some(db)))
        }
        DatabaseConfig::InMemory => {
            info!("Using in-memory store: data will be lost on shutdown");
            Ok((Arc::new(InMemoryStore::new()), None))
        }
    }
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.auth.security.cors;

    // tower-http rejects `*` inside an origin list
    let allow_origin = if cors_config.allowed_origins.iter().any(|o| matches!(o, CorsOrigin::Wildcard)) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::PUT, http::Method::PATCH])
        .allow_headers([http::header::AUTHORIZATION, http::header::CONTENT_TYPE])
        .allow_credentials(cors_config.allow_credentials);

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router: account routes, health check, API docs, CORS and tracing.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors_layer = create_cors_layer(&state.config)?;

    let auth_routes = Router::new()
        .route("/register", post(api::handlers::auth::register))
        .route("/login", post(api::handlers::auth::login))
        .route("/logout", post(api::handlers::auth::logout))
        .route("/profile", get(api::handlers::users::get_profile))
        .route(
            "/profile/update",
            put(api::handlers::users::update_profile).patch(api::handlers::users::update_profile),
        )
        .route(
            "/change-password",
            put(api::handlers::auth::change_password).patch(api::handlers::auth::change_password),
        )
        .route("/users", get(api::handlers::users::list_users))
        .with_state(state);

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(cors_layer),
        );

    Ok(router)
}

/// Main application struct.
///
/// 1. **Create**: [`Application::new`] connects the store, runs migrations and ensures the
///    admin user
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts handling requests
/// 3. **Shutdown**: when the shutdown signal resolves, in-flight requests finish, then the
///    pool is closed and telemetry flushed
pub struct Application {
    router: Router,
    app_state: AppState,
    config: Config,
    pool: Option<PgPool>,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting authctl with configuration: {:#?}", config);

        let (store, pool) = setup_store(&config).await?;
        let mut app = Self::new_with_store(config, store).await?;
        app.pool = pool;
        Ok(app)
    }

    /// Create an application over an existing store
    pub async fn new_with_store(config: Config, store: Arc<dyn AccountStore>) -> anyhow::Result<Self> {
        let app_state = AppState::builder().store(store).config(config.clone()).build();

        if let Some(email) = config.admin_email.as_deref() {
            create_initial_admin_user(email, config.admin_password.as_deref(), &app_state).await?;
        }

        let router = build_router(app_state.clone())?;

        Ok(Self {
            router,
            app_state,
            config,
            pool: None,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.app_state
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "authctl listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        if let Some(pool) = self.pool {
            info!("Closing database connections...");
            pool.close().await;
        }

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
