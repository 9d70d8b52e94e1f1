/**
 * Session Tokens
 *
 * This module handles JWT token generation and validation. The editor only
 * consumes the identity a token carries; issuing tokens is left to whatever
 * login service sits in front of it (tests and tooling use `create_token`).
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::shared::User;

/// Tokens are valid for 30 days
const TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Display name, checked against the banned-username set
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

impl Claims {
    pub fn into_user(self) -> User {
        User::new(self.sub, self.username)
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Create a signed token for `user`
pub fn create_token(secret: &str, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
    let now = now_secs();
    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        exp: now + TOKEN_TTL_SECS,
        iat: now,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_ref()))
}

/// Verify a token and return the identity it carries
pub fn verify_token(secret: &str, token: &str) -> Result<User, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_ref());
    let token_data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(token_data.claims.into_user())
}

/// Login URL that returns the user to `return_to` afterwards
pub fn create_login_url(login_url: &str, return_to: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(return_to.as_bytes()).collect();
    let separator = if login_url.contains('?') { '&' } else { '?' };
    format!("{}{}return_url={}", login_url, separator, encoded)
}
