use chrono::{Duration, Utc};
use secrecy::ExposeSecret;

use gatehouse_core::{
    AccountStore, AccountStoreError, Email, EmailClient, RecoveryCode,
};

/// Returned verbatim whether or not the address is registered, so the
/// response cannot be used to enumerate accounts.
pub const GENERIC_RECOVERY_RESPONSE: &str =
    "If your email is registered, you will receive a password recovery code";

const RECOVERY_SUBJECT: &str = "Your password recovery code";
const RECOVERY_CODE_TTL_MINUTES: i64 = 10;

/// Error types for the forgot password use case
#[derive(Debug, thiserror::Error)]
pub enum ForgotPasswordError {
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

/// Forgot password use case - issues a short-lived recovery code
pub struct ForgotPasswordUseCase<S, E>
where
    S: AccountStore,
    E: EmailClient + Clone + 'static,
{
    account_store: S,
    email_client: E,
}

impl<S, E> ForgotPasswordUseCase<S, E>
where
    S: AccountStore,
    E: EmailClient + Clone + 'static,
{
    pub fn new(account_store: S, email_client: E) -> Self {
        Self {
            account_store,
            email_client,
        }
    }

    /// For a known address: persist a fresh 6-digit code expiring in ten
    /// minutes, then mail it on a detached task. For an unknown address: do
    /// nothing. Both branches return the same message.
    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<&'static str, ForgotPasswordError> {
        let account = match self.account_store.find_by_email(&email).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => {
                tracing::debug!("recovery requested for unknown account");
                return Ok(GENERIC_RECOVERY_RESPONSE);
            }
            Err(other) => return Err(ForgotPasswordError::AccountStoreError(other)),
        };

        let code = RecoveryCode::new();
        let expires_at = Utc::now() + Duration::minutes(RECOVERY_CODE_TTL_MINUTES);
        self.account_store
            .store_recovery_code(&account.id(), code.clone(), expires_at)
            .await
            .map_err(ForgotPasswordError::AccountStoreError)?;

        let content = format!(
            "Hello {},\n\nYour password recovery code is: {}\n\n\
             It expires in {} minutes. If you did not request it, you can ignore this message.",
            account.display_name().as_str(),
            code.as_ref().expose_secret(),
            RECOVERY_CODE_TTL_MINUTES
        );

        let email_client = self.email_client.clone();
        tokio::spawn(async move {
            if let Err(error) = email_client
                .send_email(&email, RECOVERY_SUBJECT, &content)
                .await
            {
                tracing::warn!(%error, "failed to deliver recovery code email");
            }
        });

        Ok(GENERIC_RECOVERY_RESPONSE)
    }
}
