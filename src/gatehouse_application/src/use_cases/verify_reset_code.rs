use chrono::Utc;

use gatehouse_core::{AccountStore, AccountStoreError, Email, RecoveryCode, RecoveryToken};

/// Error types for the verify reset code use case. Wrong code, expired code,
/// and identity mismatch all report the same error shape.
#[derive(Debug, thiserror::Error)]
pub enum VerifyResetCodeError {
    #[error("Invalid or expired code")]
    InvalidOrExpired,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

/// Verify reset code use case - exchanges an unexpired recovery code for a
/// one-time reset token
pub struct VerifyResetCodeUseCase<S>
where
    S: AccountStore,
{
    account_store: S,
}

impl<S> VerifyResetCodeUseCase<S>
where
    S: AccountStore,
{
    pub fn new(account_store: S) -> Self {
        Self { account_store }
    }

    /// Atomic exchange: the store matches an unexpired code on the named
    /// account, installs the fresh token, and clears the code in one update,
    /// so a racing second submission of the same code fails its match.
    /// Identity is part of the match, so a correct code presented under the
    /// wrong email fails without burning the code. The returned token is
    /// the only secret this service ever hands back to a caller; the caller
    /// has just proven possession of the code, and the token is the bridge
    /// to the reset step.
    #[tracing::instrument(name = "VerifyResetCodeUseCase::execute", skip(self, code))]
    pub async fn execute(
        &self,
        email: Email,
        code: RecoveryCode,
    ) -> Result<RecoveryToken, VerifyResetCodeError> {
        let token = RecoveryToken::new();

        self.account_store
            .exchange_recovery_code(&email, &code, Utc::now(), token.clone())
            .await
            .map_err(|error| match error {
                AccountStoreError::AccountNotFound => VerifyResetCodeError::InvalidOrExpired,
                other => VerifyResetCodeError::AccountStoreError(other),
            })?;

        Ok(token)
    }
}
