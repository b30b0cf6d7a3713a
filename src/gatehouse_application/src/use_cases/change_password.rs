use gatehouse_core::{
    AccountId, AccountStore, AccountStoreError, Password, PasswordHasher, PasswordHasherError,
};

/// Error types for the change password use case
#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("Account not found")]
    AccountNotFound,
    #[error("Current password is incorrect")]
    IncorrectPassword,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
    #[error("Password hasher error: {0}")]
    PasswordHasherError(#[from] PasswordHasherError),
}

/// Change password use case - authenticated password update, bypassing the
/// recovery flow entirely
pub struct ChangePasswordUseCase<S, H>
where
    S: AccountStore,
    H: PasswordHasher,
{
    account_store: S,
    password_hasher: H,
}

impl<S, H> ChangePasswordUseCase<S, H>
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

    /// The account id comes from a verified session token, so a missing
    /// account is an internal anomaly rather than a caller mistake. A wrong
    /// current password leaves the stored hash untouched.
    #[tracing::instrument(
        name = "ChangePasswordUseCase::execute",
        skip(self, current_password, new_password)
    )]
    pub async fn execute(
        &self,
        account_id: AccountId,
        current_password: Password,
        new_password: Password,
    ) -> Result<(), ChangePasswordError> {
        let account = self
            .account_store
            .find_by_id(&account_id)
            .await
            .map_err(|error| match error {
                AccountStoreError::AccountNotFound => ChangePasswordError::AccountNotFound,
                other => ChangePasswordError::AccountStoreError(other),
            })?;

        let matches = self
            .password_hasher
            .verify(current_password, account.password_hash())
            .await?;
        if !matches {
            return Err(ChangePasswordError::IncorrectPassword);
        }

        let new_hash = self.password_hasher.hash(new_password).await?;
        self.account_store
            .set_password_hash(&account_id, new_hash)
            .await
            .map_err(ChangePasswordError::AccountStoreError)?;

        Ok(())
    }
}
