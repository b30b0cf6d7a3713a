use gatehouse_core::{
    AccountStore, AccountStoreError, Email, Password, PasswordHasher, PasswordHasherError,
    SanitizedAccount, TokenIssuer, TokenIssuerError,
};

/// Response from the login use case
#[derive(Debug)]
pub struct LoginResponse {
    pub session_token: String,
    pub account: SanitizedAccount,
}

/// Error types for the login use case. Unknown email, wrong password, and an
/// unverified account all collapse into `InvalidCredentials`; the internal
/// lookup can tell them apart for tracing, the caller cannot.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
    #[error("Password hasher error: {0}")]
    PasswordHasherError(#[from] PasswordHasherError),
    #[error("Token error: {0}")]
    TokenIssuerError(#[from] TokenIssuerError),
}

/// Login use case - validates credentials and issues a session token
pub struct LoginUseCase<S, H, T>
where
    S: AccountStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    account_store: S,
    password_hasher: H,
    token_issuer: T,
    require_verified_email: bool,
}

impl<S, H, T> LoginUseCase<S, H, T>
where
    S: AccountStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    pub fn new(
        account_store: S,
        password_hasher: H,
        token_issuer: T,
        require_verified_email: bool,
    ) -> Self {
        Self {
            account_store,
            password_hasher,
            token_issuer,
            require_verified_email,
        }
    }

    /// Check the password against the stored hash and return a sanitized
    /// projection of the account, with every secret stripped.
    #[tracing::instrument(name = "LoginUseCase::validate_credentials", skip(self, password))]
    pub async fn validate_credentials(
        &self,
        email: &Email,
        password: Password,
    ) -> Result<SanitizedAccount, LoginError> {
        let account = self
            .account_store
            .find_by_email(email)
            .await
            .map_err(|error| match error {
                AccountStoreError::AccountNotFound => {
                    tracing::debug!("login attempt for unknown account");
                    LoginError::InvalidCredentials
                }
                other => LoginError::AccountStoreError(other),
            })?;

        let matches = self
            .password_hasher
            .verify(password, account.password_hash())
            .await?;
        if !matches {
            return Err(LoginError::InvalidCredentials);
        }

        if self.require_verified_email && !account.is_verified() {
            tracing::debug!("login attempt for unverified account");
            return Err(LoginError::InvalidCredentials);
        }

        Ok(SanitizedAccount::from(&account))
    }

    /// Pure function of an already-validated account: sign a session token
    /// carrying the identity and subject id. Does not touch the store.
    pub fn issue_session(&self, account: &SanitizedAccount) -> Result<String, LoginError> {
        Ok(self.token_issuer.sign(account)?)
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<LoginResponse, LoginError> {
        let account = self.validate_credentials(&email, password).await?;
        let session_token = self.issue_session(&account)?;

        Ok(LoginResponse {
            session_token,
            account,
        })
    }
}
