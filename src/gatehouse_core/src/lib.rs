pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AccountError, AccountId, Role, SanitizedAccount},
    display_name::DisplayName,
    email::Email,
    password::{Password, PasswordHash},
    recovery_code::RecoveryCode,
    recovery_error::RecoveryError,
    recovery_token::RecoveryToken,
    verification_secret::VerificationSecret,
};

pub use ports::{
    repositories::{AccountStore, AccountStoreError},
    services::{
        EmailClient, PasswordHasher, PasswordHasherError, RateLimitError, RateLimiter,
        SessionClaims, TokenIssuer, TokenIssuerError,
    },
};
