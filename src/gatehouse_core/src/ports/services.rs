use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    account::SanitizedAccount,
    email::Email,
    password::{Password, PasswordHash},
};

/// Port trait for the notification sender. Best-effort: callers invoke it
/// after their store commit and log failures instead of propagating them.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

// PasswordHasher port trait and errors
#[derive(Debug, Error)]
pub enum PasswordHasherError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),
}

/// One-way adaptive hash. `verify` reports mismatch as `Ok(false)`; its
/// timing must not depend on how close the candidate is to correct.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError>;

    async fn verify(
        &self,
        candidate: Password,
        expected: &PasswordHash,
    ) -> Result<bool, PasswordHasherError>;
}

// TokenIssuer port trait, claims, and errors
#[derive(Debug, Error)]
pub enum TokenIssuerError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token error: {0}")]
    SigningFailed(String),
}

/// Claims carried by a session token: the account email as subject, the
/// account id, and the expiry timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub sid: String,
    pub exp: usize,
}

/// Signs and verifies self-contained session tokens. There is no revocation
/// list: a compromised token stays valid until its natural expiry.
pub trait TokenIssuer: Send + Sync {
    fn sign(&self, account: &SanitizedAccount) -> Result<String, TokenIssuerError>;

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenIssuerError>;
}

// RateLimiter port trait and errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("Too many requests")]
    LimitExceeded,
}

/// Injectable request throttle, keyed by caller identity (client IP at the
/// HTTP layer). Swappable for a shared store in a multi-instance deployment.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn check(&self, key: &str) -> Result<(), RateLimitError>;
}
