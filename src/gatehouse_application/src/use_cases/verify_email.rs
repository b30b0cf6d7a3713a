use gatehouse_core::{AccountStore, AccountStoreError, VerificationSecret};

/// Error types for the verify email use case
#[derive(Debug, thiserror::Error)]
pub enum VerifyEmailError {
    #[error("Invalid or expired verification link")]
    InvalidSecret,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

/// Verify email use case - consumes a pending verification secret
pub struct VerifyEmailUseCase<S>
where
    S: AccountStore,
{
    account_store: S,
}

impl<S> VerifyEmailUseCase<S>
where
    S: AccountStore,
{
    pub fn new(account_store: S) -> Self {
        Self { account_store }
    }

    /// Flip `verified` and clear the secret in one atomic store update.
    /// A replayed secret no longer matches anything and reports
    /// `InvalidSecret`: single use, not an error in the flow.
    #[tracing::instrument(name = "VerifyEmailUseCase::execute", skip_all)]
    pub async fn execute(&self, secret: VerificationSecret) -> Result<(), VerifyEmailError> {
        self.account_store
            .consume_verification_secret(&secret)
            .await
            .map_err(|error| match error {
                AccountStoreError::AccountNotFound => VerifyEmailError::InvalidSecret,
                other => VerifyEmailError::AccountStoreError(other),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::register::RegisterUseCase;
    use crate::use_cases::test_support::{
        FakeAccountStore, FakeHasher, RecordingEmailClient, display_name, email, password,
    };

    async fn store_with_pending_account() -> (FakeAccountStore, VerificationSecret) {
        let store = FakeAccountStore::new();
        let register = RegisterUseCase::new(
            store.clone(),
            FakeHasher,
            RecordingEmailClient::default(),
            "http://localhost:3000".to_string(),
        );
        register
            .execute(email("a@x.com"), password("pw123456"), display_name("A"))
            .await
            .unwrap();
        let secret = store
            .get(&email("a@x.com"))
            .await
            .unwrap()
            .verification_secret()
            .unwrap()
            .clone();
        (store, secret)
    }

    #[tokio::test]
    async fn consumes_secret_and_marks_verified() {
        let (store, secret) = store_with_pending_account().await;
        let use_case = VerifyEmailUseCase::new(store.clone());

        use_case.execute(secret).await.unwrap();

        let account = store.get(&email("a@x.com")).await.unwrap();
        assert!(account.is_verified());
        assert!(account.verification_secret().is_none());
    }

    #[tokio::test]
    async fn replayed_secret_is_rejected() {
        let (store, secret) = store_with_pending_account().await;
        let use_case = VerifyEmailUseCase::new(store);

        use_case.execute(secret.clone()).await.unwrap();
        let replay = use_case.execute(secret).await;

        assert!(matches!(replay, Err(VerifyEmailError::InvalidSecret)));
    }

    #[tokio::test]
    async fn unknown_secret_is_rejected() {
        let (store, _) = store_with_pending_account().await;
        let use_case = VerifyEmailUseCase::new(store);

        let result = use_case.execute(VerificationSecret::new()).await;
        assert!(matches!(result, Err(VerifyEmailError::InvalidSecret)));
    }
}
