//! Opaque session tokens.
//!
//! A token is 32 random bytes encoded as base64url. Only its SHA-256 digest is persisted, so a
//! token can be checked but never recovered from the store.

use axum::http::{HeaderMap, header::AUTHORIZATION};
use base64::{Engine as _, engine::general_purpose};
use rand::prelude::RngExt;
use rand::rng;
use sha2::{Digest, Sha256};

/// Authorization schemes accepted in the `Authorization` header.
const TOKEN_SCHEMES: [&str; 2] = ["Token", "Bearer"];

/// A freshly issued token: the key handed to the client and the digest stored for it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub key: String,
    pub digest: String,
}

impl IssuedToken {
    pub fn generate() -> Self {
        let key = generate_token();
        let digest = token_digest(&key);
        Self { key, digest }
    }
}

/// Generate a secure random session token
pub fn generate_token() -> String {
    // Generate 32 bytes (256 bits) of cryptographically secure random data
    let mut token_bytes = [0u8; 32];
    rng().fill(&mut token_bytes);

    general_purpose::URL_SAFE_NO_PAD.encode(token_bytes)
}

/// Digest under which a token is stored and looked up.
pub fn token_digest(token: &str) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(Sha256::digest(token.as_bytes()))
}

/// Extract the token from `Authorization: Token <key>` (or `Bearer <key>`).
///
/// Returns `None` when the header is missing, uses another scheme, or carries no key.
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, key) = value.trim().split_once(' ')?;
    if !TOKEN_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
        return None;
    }
    let key = key.trim();
    (!key.is_empty() && !key.contains(' ')).then_some(key)
}
