use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors an authentication backend can produce
#[derive(Error, Debug, PartialEq)]
pub enum AuthError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
}

/// A successfully authenticated user
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub email: String,
}

/// Pluggable authentication backend
///
/// The HTTP layer only ever talks to this trait, so a real identity provider
/// can replace the stub without touching any handler.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verifies a credential pair, returning the signed-in user on success
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;
}

/// Stand-in backend that accepts any well-formed credential pair
///
/// It sleeps briefly before answering so the sign-in flow exercises the same
/// latency a network identity provider would have.
pub struct StubAuthProvider {
    delay: Duration,
}

impl StubAuthProvider {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(500),
        }
    }

    /// A stub with a custom response delay; tests use `Duration::ZERO`
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for StubAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for StubAuthProvider {
    #[instrument(skip(self, password), fields(email = %email))]
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        debug!("Authenticating against stub backend");

        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "Email must not be empty".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "Password must not be empty".to_string(),
            ));
        }

        tokio::time::sleep(self.delay).await;

        Ok(AuthUser {
            email: email.to_string(),
        })
    }
}
