use gatehouse_core::{
    AccountStore, AccountStoreError, Password, PasswordHasher, PasswordHasherError, RecoveryToken,
};

/// Error types for the reset password use case
#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Invalid or expired reset token")]
    InvalidToken,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
    #[error("Password hasher error: {0}")]
    PasswordHasherError(#[from] PasswordHasherError),
}

/// Reset password use case - consumes a one-time reset token
pub struct ResetPasswordUseCase<S, H>
where
    S: AccountStore,
    H: PasswordHasher,
{
    account_store: S,
    password_hasher: H,
}

impl<S, H> ResetPasswordUseCase<S, H>
where
    S: AccountStore,
    H: PasswordHasher,
{
    pub fn new(account_store: S, password_hasher: H) -> Self {
        Self {
            account_store,
            password_hasher,
        }
    }

    /// Hash the replacement password first, then let the store match the
    /// token, install the hash, and clear the token plus any stale recovery
    /// code in one atomic update.
    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: RecoveryToken,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        let new_hash = self.password_hasher.hash(new_password).await?;

        self.account_store
            .consume_recovery_token(&token, new_hash)
            .await
            .map_err(|error| match error {
                AccountStoreError::AccountNotFound => ResetPasswordError::InvalidToken,
                other => ResetPasswordError::AccountStoreError(other),
            })?;

        Ok(())
    }
}
