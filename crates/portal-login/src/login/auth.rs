//! Authentication seam.
//!
//! The form only needs "exactly one pending call, success or a generic
//! failure". Real deployments plug a backend in behind [`Authenticator`].

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use portal_common::{Role, Session};
use rand::Rng;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Username or password rejected; deliberately not more specific
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("network error: {0}")]
    Network(String),
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(
        &self,
        role: Role,
        username: &str,
        password: &str,
    ) -> Result<Session, AuthError>;
}

/// Reference backend: fixed sentinel credentials behind an artificial delay
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    delay: Duration,
    username: String,
    password: String,
}

impl MockAuthenticator {
    pub const USERNAME: &'static str = "test";
    pub const PASSWORD: &'static str = "password";

    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            username: Self::USERNAME.to_string(),
            password: Self::PASSWORD.to_string(),
        }
    }

    /// Generate a cryptographically secure session token
    fn generate_token() -> String {
        let mut bytes = [0u8; 32];
        rand::rng().fill(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(
        &self,
        role: Role,
        username: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        tokio::time::sleep(self.delay).await;

        if username == self.username && password == self.password {
            tracing::info!(role = %role, "Mock authentication accepted");
            Ok(Session::new(role, username, Self::generate_token()))
        } else {
            tracing::debug!(role = %role, "Mock authentication rejected");
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Wraps a backend and reports a call that outlives `timeout` as a network error
pub struct TimeoutAuthenticator<A> {
    inner: A,
    timeout: Duration,
}

impl<A: Authenticator> TimeoutAuthenticator<A> {
    pub fn new(inner: A, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<A: Authenticator> Authenticator for TimeoutAuthenticator<A> {
    async fn authenticate(
        &self,
        role: Role,
        username: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        match tokio::time::timeout(self.timeout, self.inner.authenticate(role, username, password)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(role = %role, timeout_ms = self.timeout.as_millis() as u64, "Authentication timed out");
                Err(AuthError::Network(format!(
                    "no response within {}ms",
                    self.timeout.as_millis()
                )))
            }
        }
    }
}
