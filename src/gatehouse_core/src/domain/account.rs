use std::fmt;

use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::display_name::DisplayName;
use super::email::Email;
use super::password::PasswordHash;
use super::recovery_code::RecoveryCode;
use super::recovery_token::RecoveryToken;
use super::verification_secret::VerificationSecret;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("Invalid display name")]
    InvalidDisplayName,
    #[error("Invalid account id")]
    InvalidAccountId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Result<Self, AccountError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| AccountError::InvalidAccountId)
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// The single persisted entity of the credential lifecycle. Created
/// unverified at registration; the recovery fields come and go as the
/// forgotten-password flow advances and each clears itself on consumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    email: Email,
    password_hash: PasswordHash,
    display_name: DisplayName,
    verified: bool,
    verification_secret: Option<VerificationSecret>,
    recovery_code: Option<RecoveryCode>,
    recovery_code_expires_at: Option<DateTime<Utc>>,
    recovery_token: Option<RecoveryToken>,
    role: Role,
    active: bool,
}

impl Account {
    pub fn new(
        email: Email,
        password_hash: PasswordHash,
        display_name: DisplayName,
        verification_secret: VerificationSecret,
    ) -> Self {
        Self {
            id: AccountId::new(),
            email,
            password_hash,
            display_name,
            verified: false,
            verification_secret: Some(verification_secret),
            recovery_code: None,
            recovery_code_expires_at: None,
            recovery_token: None,
            role: Role::default(),
            active: true,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn verification_secret(&self) -> Option<&VerificationSecret> {
        self.verification_secret.as_ref()
    }

    pub fn recovery_code(&self) -> Option<&RecoveryCode> {
        self.recovery_code.as_ref()
    }

    pub fn recovery_code_expires_at(&self) -> Option<DateTime<Utc>> {
        self.recovery_code_expires_at
    }

    pub fn recovery_token(&self) -> Option<&RecoveryToken> {
        self.recovery_token.as_ref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True when `code` matches the stored code and the expiry has not
    /// passed. A stale expiry invalidates the code even though it is still
    /// stored; nothing sweeps it eagerly.
    pub fn has_unexpired_recovery_code(&self, code: &RecoveryCode, now: DateTime<Utc>) -> bool {
        match (&self.recovery_code, self.recovery_code_expires_at) {
            (Some(stored), Some(expires_at)) => stored == code && expires_at > now,
            _ => false,
        }
    }

    /// Flips `verified` and clears the secret; the two always change
    /// together so a consumed secret cannot match again.
    pub fn mark_verified(&mut self) {
        self.verified = true;
        self.verification_secret = None;
    }

    pub fn set_recovery_code(&mut self, code: RecoveryCode, expires_at: DateTime<Utc>) {
        self.recovery_code = Some(code);
        self.recovery_code_expires_at = Some(expires_at);
    }

    /// Installs the one-time reset token while clearing the code it was
    /// exchanged for, in the same mutation.
    pub fn install_recovery_token(&mut self, token: RecoveryToken) {
        self.recovery_token = Some(token);
        self.recovery_code = None;
        self.recovery_code_expires_at = None;
    }

    /// The password update that consumes the token also clears any stale
    /// recovery state left over from the flow.
    pub fn consume_recovery_token(&mut self, new_hash: PasswordHash) {
        self.password_hash = new_hash;
        self.recovery_token = None;
        self.recovery_code = None;
        self.recovery_code_expires_at = None;
    }

    pub fn set_password_hash(&mut self, new_hash: PasswordHash) {
        self.password_hash = new_hash;
    }
}

/// Projection of an account with the password hash and every secret
/// stripped. The only account shape that leaves the lifecycle manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedAccount {
    pub id: AccountId,
    pub email: Email,
    pub display_name: DisplayName,
    pub role: Role,
    pub verified: bool,
}

impl From<&Account> for SanitizedAccount {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            display_name: account.display_name.clone(),
            role: account.role,
            verified: account.verified,
        }
    }
}

impl Serialize for SanitizedAccount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("SanitizedAccount", 5)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("email", self.email.as_ref().expose_secret())?;
        state.serialize_field("displayName", self.display_name.as_str())?;
        state.serialize_field("role", &self.role)?;
        state.serialize_field("verified", &self.verified)?;
        state.end()
    }
}
