use secrecy::ExposeSecret;

use gatehouse_core::{
    Account, AccountStore, AccountStoreError, DisplayName, Email, EmailClient, Password,
    PasswordHasher, PasswordHasherError, VerificationSecret,
};

const VERIFICATION_SUBJECT: &str = "Verify your email";

/// Error types for the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Password hasher error: {0}")]
    PasswordHasherError(#[from] PasswordHasherError),
}

/// Register use case - creates an unverified account and mails the
/// verification link
pub struct RegisterUseCase<S, H, E>
where
    S: AccountStore,
    H: PasswordHasher,
    E: EmailClient + Clone + 'static,
{
    account_store: S,
    password_hasher: H,
    email_client: E,
    verification_base_url: String,
}

impl<S, H, E> RegisterUseCase<S, H, E>
where
    S: AccountStore,
    H: PasswordHasher,
    E: EmailClient + Clone + 'static,
{
    pub fn new(
        account_store: S,
        password_hasher: H,
        email_client: E,
        verification_base_url: String,
    ) -> Self {
        Self {
            account_store,
            password_hasher,
            email_client,
            verification_base_url,
        }
    }

    /// Hash the password, persist a new unverified account with a pending
    /// verification secret, then send the verification link. Delivery runs
    /// on a detached task after the store commit: a sender outage must not
    /// fail the registration, and the raw secret is never returned.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        display_name: DisplayName,
    ) -> Result<(), RegisterError> {
        let password_hash = self.password_hasher.hash(password).await?;
        let secret = VerificationSecret::new();

        let account = Account::new(
            email.clone(),
            password_hash,
            display_name.clone(),
            secret.clone(),
        );
        self.account_store.add_account(account).await?;

        let link = format!(
            "{}/auth/verify-email?code={}",
            self.verification_base_url.trim_end_matches('/'),
            secret.as_ref().expose_secret()
        );
        let content = format!(
            "Hello {},\n\nConfirm your address by opening the link below:\n{}\n\n\
             If you did not create this account, you can ignore this message.",
            display_name.as_str(),
            link
        );

        let email_client = self.email_client.clone();
        tokio::spawn(async move {
            if let Err(error) = email_client
                .send_email(&email, VERIFICATION_SUBJECT, &content)
                .await
            {
                tracing::warn!(%error, "failed to deliver verification email");
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        FailingEmailClient, FakeAccountStore, FakeHasher, RecordingEmailClient, display_name,
        email, password,
    };
    use secrecy::ExposeSecret;

    fn use_case<E: EmailClient + Clone + 'static>(
        store: FakeAccountStore,
        client: E,
    ) -> RegisterUseCase<FakeAccountStore, FakeHasher, E> {
        RegisterUseCase::new(
            store,
            FakeHasher,
            client,
            "http://localhost:3000".to_string(),
        )
    }

    #[tokio::test]
    async fn creates_unverified_account_with_pending_secret() {
        let store = FakeAccountStore::new();
        let use_case = use_case(store.clone(), RecordingEmailClient::default());

        use_case
            .execute(email("a@x.com"), password("pw123456"), display_name("A"))
            .await
            .unwrap();

        let account = store.get(&email("a@x.com")).await.unwrap();
        assert!(!account.is_verified());
        assert!(account.verification_secret().is_some());
        assert_eq!(
            account.password_hash().as_ref().expose_secret(),
            "hashed:pw123456"
        );
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_and_leaves_first_account_untouched() {
        let store = FakeAccountStore::new();
        let use_case = use_case(store.clone(), RecordingEmailClient::default());

        use_case
            .execute(email("a@x.com"), password("first-pw"), display_name("A"))
            .await
            .unwrap();
        let original = store.get(&email("a@x.com")).await.unwrap();

        let result = use_case
            .execute(email("a@x.com"), password("second-pw"), display_name("B"))
            .await;
        assert!(matches!(
            result,
            Err(RegisterError::AccountStoreError(
                AccountStoreError::AccountAlreadyExists
            ))
        ));

        let after = store.get(&email("a@x.com")).await.unwrap();
        assert_eq!(
            after.password_hash().as_ref().expose_secret(),
            original.password_hash().as_ref().expose_secret()
        );
        assert_eq!(after.verification_secret(), original.verification_secret());
    }

    #[tokio::test]
    async fn verification_email_embeds_the_stored_secret() {
        let store = FakeAccountStore::new();
        let client = RecordingEmailClient::default();
        let use_case = use_case(store.clone(), client.clone());

        use_case
            .execute(email("a@x.com"), password("pw123456"), display_name("A"))
            .await
            .unwrap();

        // the send runs on a spawned task
        tokio::task::yield_now().await;

        let account = store.get(&email("a@x.com")).await.unwrap();
        let secret = account
            .verification_secret()
            .unwrap()
            .as_ref()
            .expose_secret()
            .clone();

        let sent = client.sent.read().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@x.com");
        assert!(sent[0].content.contains(&secret));
    }

    #[tokio::test]
    async fn delivery_failure_does_not_fail_registration() {
        let store = FakeAccountStore::new();
        let use_case = use_case(store.clone(), FailingEmailClient);

        let result = use_case
            .execute(email("a@x.com"), password("pw123456"), display_name("A"))
            .await;

        assert!(result.is_ok());
        assert!(store.get(&email("a@x.com")).await.is_some());
    }
}
