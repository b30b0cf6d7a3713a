use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gatehouse_application::{
    ChangePasswordError, ForgotPasswordError, LoginError, RegisterError, ResetPasswordError,
    VerifyEmailError, VerifyResetCodeError,
};
use gatehouse_core::{
    AccountError, AccountStoreError, RateLimitError, RecoveryError, TokenIssuerError,
};

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Email is already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    InvalidOrExpired(String),

    #[error("Current password is incorrect")]
    IncorrectPassword,

    #[error("Invalid or missing session")]
    InvalidSession,

    #[error("Too many requests")]
    TooManyRequests,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            ApiError::InvalidInput(_)
            | ApiError::InvalidOrExpired(_)
            | ApiError::IncorrectPassword => (StatusCode::BAD_REQUEST, self.to_string()),

            ApiError::EmailAlreadyRegistered => (StatusCode::CONFLICT, self.to_string()),

            ApiError::InvalidCredentials | ApiError::InvalidSession => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }

            ApiError::TooManyRequests => (StatusCode::TOO_MANY_REQUESTS, self.to_string()),

            ApiError::UnexpectedError(detail) => {
                tracing::error!(%detail, "request failed unexpectedly");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(error: AccountError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<RecoveryError> for ApiError {
    fn from(error: RecoveryError) -> Self {
        ApiError::InvalidOrExpired(error.to_string())
    }
}

impl From<TokenIssuerError> for ApiError {
    fn from(error: TokenIssuerError) -> Self {
        match error {
            TokenIssuerError::InvalidToken => ApiError::InvalidSession,
            TokenIssuerError::SigningFailed(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<RateLimitError> for ApiError {
    fn from(_: RateLimitError) -> Self {
        ApiError::TooManyRequests
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::AccountStoreError(AccountStoreError::AccountAlreadyExists) => {
                ApiError::EmailAlreadyRegistered
            }
            RegisterError::AccountStoreError(e) => ApiError::UnexpectedError(e.to_string()),
            RegisterError::PasswordHasherError(e) => ApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<VerifyEmailError> for ApiError {
    fn from(error: VerifyEmailError) -> Self {
        match error {
            VerifyEmailError::InvalidSecret => ApiError::InvalidOrExpired(error.to_string()),
            VerifyEmailError::AccountStoreError(e) => ApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => ApiError::InvalidCredentials,
            LoginError::AccountStoreError(e) => ApiError::UnexpectedError(e.to_string()),
            LoginError::PasswordHasherError(e) => ApiError::UnexpectedError(e.to_string()),
            LoginError::TokenIssuerError(e) => ApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<ForgotPasswordError> for ApiError {
    fn from(error: ForgotPasswordError) -> Self {
        match error {
            ForgotPasswordError::AccountStoreError(e) => ApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<VerifyResetCodeError> for ApiError {
    fn from(error: VerifyResetCodeError) -> Self {
        match error {
            VerifyResetCodeError::InvalidOrExpired => ApiError::InvalidOrExpired(error.to_string()),
            VerifyResetCodeError::AccountStoreError(e) => ApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<ResetPasswordError> for ApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::InvalidToken => ApiError::InvalidOrExpired(error.to_string()),
            ResetPasswordError::AccountStoreError(e) => ApiError::UnexpectedError(e.to_string()),
            ResetPasswordError::PasswordHasherError(e) => ApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<ChangePasswordError> for ApiError {
    fn from(error: ChangePasswordError) -> Self {
        match error {
            ChangePasswordError::AccountNotFound => ApiError::InvalidInput(error.to_string()),
            ChangePasswordError::IncorrectPassword => ApiError::IncorrectPassword,
            ChangePasswordError::AccountStoreError(e) => ApiError::UnexpectedError(e.to_string()),
            ChangePasswordError::PasswordHasherError(e) => ApiError::UnexpectedError(e.to_string()),
        }
    }
}
