use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    account::{Account, AccountId},
    email::Email,
    password::PasswordHash,
    recovery_code::RecoveryCode,
    recovery_token::RecoveryToken,
    verification_secret::VerificationSecret,
};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Account already exists")]
    AccountAlreadyExists,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AccountAlreadyExists, Self::AccountAlreadyExists) => true,
            (Self::AccountNotFound, Self::AccountNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Credential store collaborator. Implementations must make every
/// match-then-mutate operation a single atomic call: when two requests race
/// on the same secret, the first consumes it and the second's match fails
/// with `AccountNotFound`.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn add_account(&self, account: Account) -> Result<(), AccountStoreError>;

    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError>;

    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError>;

    /// Atomic: match the pending verification secret, set `verified`, clear
    /// the secret. Returns the updated account.
    async fn consume_verification_secret(
        &self,
        secret: &VerificationSecret,
    ) -> Result<Account, AccountStoreError>;

    async fn store_recovery_code(
        &self,
        id: &AccountId,
        code: RecoveryCode,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountStoreError>;

    /// Atomic: match an unexpired recovery code on the named account,
    /// install the one-time reset token, clear the code and its expiry.
    /// Identity is part of the match: a correct code presented under the
    /// wrong email fails without mutating anything. Expiry is evaluated
    /// against `now` on lookup; stale codes fail the match without being
    /// purged.
    async fn exchange_recovery_code(
        &self,
        email: &Email,
        code: &RecoveryCode,
        now: DateTime<Utc>,
        token: RecoveryToken,
    ) -> Result<Account, AccountStoreError>;

    /// Atomic: match the reset token, set the new password hash, clear the
    /// token and any stale recovery code state.
    async fn consume_recovery_token(
        &self,
        token: &RecoveryToken,
        new_hash: PasswordHash,
    ) -> Result<Account, AccountStoreError>;

    async fn set_password_hash(
        &self,
        id: &AccountId,
        new_hash: PasswordHash,
    ) -> Result<(), AccountStoreError>;
}
