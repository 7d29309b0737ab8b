//! Test utilities shared by unit and HTTP-level tests.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{Value, json};

use crate::{
    api::models::auth::RegisterRequest,
    config::{AuthConfig, Config, DatabaseConfig, NativeAuthConfig, PasswordConfig},
    db::{in_memory::InMemoryStore, models::users::UserCreateDBRequest},
};

/// Configuration backed by the in-memory store, with cheap Argon2 parameters.
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseConfig::InMemory,
        auth: AuthConfig {
            native: NativeAuthConfig {
                allow_registration: true,
                password: PasswordConfig {
                    argon2_memory_kib: 8,
                    argon2_iterations: 1,
                    argon2_parallelism: 1,
                    ..Default::default()
                },
            },
            ..Default::default()
        },
        ..Default::default()
    }
}

/// A registration payload with a matching confirmation and no optional fields.
pub fn register_request(username: &str, email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        username: Some(username.to_string()),
        email: Some(email.to_string()),
        password: Some(password.to_string()),
        password_confirm: Some(password.to_string()),
        ..Default::default()
    }
}

/// A store-level user with empty profile fields.
pub fn user_create_request(username: &str, email: &str, password_hash: Option<&str>) -> UserCreateDBRequest {
    UserCreateDBRequest {
        username: username.to_string(),
        email: email.to_string(),
        first_name: String::new(),
        last_name: String::new(),
        phone_number: None,
        date_of_birth: None,
        profile_picture: None,
        is_staff: false,
        is_verified: false,
        password_hash: password_hash.map(str::to_string),
    }
}

pub async fn create_test_app() -> TestServer {
    create_test_app_with_config(test_config()).await
}

pub async fn create_test_app_with_config(config: Config) -> TestServer {
    let app = crate::Application::new_with_store(config, Arc::new(InMemoryStore::new()))
        .await
        .expect("Failed to create application");
    app.into_test_server()
}

/// `Authorization` header carrying `token`.
pub fn auth_header(token: &str) -> (String, String) {
    ("authorization".to_string(), format!("Token {token}"))
}

/// Register a user over HTTP and return the issued token.
pub async fn register_user(server: &TestServer, username: &str, email: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "email": email,
            "password": password,
            "password_confirm": password,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    token_of(&response.json())
}

/// Log in over HTTP and return the issued token.
pub async fn login_user(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({"email": email, "password": password}))
        .await;
    response.assert_status_ok();
    token_of(&response.json())
}

fn token_of(body: &Value) -> String {
    body["token"].as_str().expect("response carries a token").to_string()
}
