//! Admin authentication gate
//!
//! A single configured username/password pair is exchanged for an opaque
//! bearer token, which is then checked against the [`SessionStore`] on every
//! admin request.

use std::fmt;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::session::{AdminSession, SessionStore};

/// Authorization scheme prefix, matched case-sensitively
pub const BEARER_PREFIX: &str = "Bearer ";

/// Random bytes per token
const TOKEN_BYTES: usize = 32;

/// Authentication failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Username or password did not match
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Authorization header missing or not a Bearer header
    #[error("missing or malformed authorization header")]
    Unauthenticated,

    /// Bearer token is not a registered session
    #[error("unknown session token")]
    InvalidSession,
}

/// The configured admin username and password
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        // Both comparisons always run
        let username_ok = self.username == username;
        let password_ok = self.password == password;
        username_ok & password_ok
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Issues and checks admin bearer tokens
#[derive(Debug, Clone)]
pub struct AdminAuth {
    credentials: AdminCredentials,
    sessions: SessionStore,
}

impl AdminAuth {
    pub fn new(credentials: AdminCredentials, sessions: SessionStore) -> Self {
        Self {
            credentials,
            sessions,
        }
    }

    /// Check credentials and register a new session
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        if !self.credentials.matches(username, password) {
            warn!("Rejected admin login for user {}", username);
            return Err(AuthError::InvalidCredentials);
        }

        let token = generate_token();
        self.sessions
            .insert(AdminSession {
                token: token.clone(),
                username: self.credentials.username.clone(),
                logged_in_at: Utc::now(),
            })
            .await;

        info!(
            "Admin {} logged in ({} active sessions)",
            username,
            self.sessions.len().await
        );
        Ok(token)
    }

    /// Validate an `Authorization` header value and return its token
    pub async fn authorize(&self, header: Option<&str>) -> Result<String, AuthError> {
        let Some(token) = header.and_then(|value| value.strip_prefix(BEARER_PREFIX)) else {
            warn!("Rejected admin request: {}", AuthError::Unauthenticated);
            return Err(AuthError::Unauthenticated);
        };

        match self.sessions.get(token).await {
            Some(session) => {
                debug!("Authorized admin request for {}", session.username);
                Ok(session.token)
            }
            None => {
                warn!("Rejected admin request: {}", AuthError::InvalidSession);
                Err(AuthError::InvalidSession)
            }
        }
    }
}

/// 256 bits from the OS RNG, URL-safe base64 without padding
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AdminAuth {
        AdminAuth::new(
            AdminCredentials::new("admin", "s3cret"),
            SessionStore::new(),
        )
    }

    #[tokio::test]
    async fn login_with_correct_credentials_twice_yields_distinct_valid_tokens() {
        let auth = gate();

        let first = auth.login("admin", "s3cret").await.unwrap();
        let second = auth.login("admin", "s3cret").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(
            auth.authorize(Some(&format!("Bearer {first}"))).await,
            Ok(first.clone())
        );
        assert_eq!(
            auth.authorize(Some(&format!("Bearer {second}"))).await,
            Ok(second.clone())
        );
    }

    #[tokio::test]
    async fn login_rejects_any_mismatch_with_the_same_error() {
        let auth = gate();

        for (username, password) in [
            ("admin", "wrong"),
            ("root", "s3cret"),
            ("Admin", "s3cret"),
            ("admin", "S3CRET"),
            ("", ""),
        ] {
            assert_eq!(
                auth.login(username, password).await,
                Err(AuthError::InvalidCredentials),
                "{username}/{password} should be rejected"
            );
        }
        assert_eq!(auth.sessions.len().await, 0);
    }

    #[tokio::test]
    async fn tokens_are_url_safe_and_carry_256_bits() {
        let token = gate().login("admin", "s3cret").await.unwrap();

        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[tokio::test]
    async fn authorize_requires_a_header() {
        assert_eq!(gate().authorize(None).await, Err(AuthError::Unauthenticated));
    }

    #[tokio::test]
    async fn authorize_rejects_other_schemes_even_for_valid_tokens() {
        let auth = gate();
        let token = auth.login("admin", "s3cret").await.unwrap();

        for header in [
            format!("Token {token}"),
            format!("bearer {token}"),
            format!("Bearer{token}"),
            token.clone(),
        ] {
            assert_eq!(
                auth.authorize(Some(&header)).await,
                Err(AuthError::Unauthenticated),
                "{header} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn authorize_rejects_unknown_tokens() {
        let auth = gate();
        auth.login("admin", "s3cret").await.unwrap();

        assert_eq!(
            auth.authorize(Some("Bearer abc")).await,
            Err(AuthError::InvalidSession)
        );
        assert_eq!(
            auth.authorize(Some("Bearer ")).await,
            Err(AuthError::InvalidSession)
        );
    }

    #[test]
    fn debug_output_hides_the_password() {
        let rendered = format!("{:?}", AdminCredentials::new("admin", "s3cret"));

        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("s3cret"));
    }
}
