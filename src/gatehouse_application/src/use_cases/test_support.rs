//! Hand-rolled fakes shared by the use case tests.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

use gatehouse_core::{
    Account, AccountId, AccountStore, AccountStoreError, DisplayName, Email, EmailClient, Password,
    PasswordHash, PasswordHasher, PasswordHasherError, RecoveryCode, RecoveryToken,
    SanitizedAccount, SessionClaims, TokenIssuer, TokenIssuerError, VerificationSecret,
};

pub fn email(raw: &str) -> Email {
    Email::try_from(Secret::from(raw.to_string())).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::from(raw.to_string())).unwrap()
}

pub fn display_name(raw: &str) -> DisplayName {
    DisplayName::try_from(raw.to_string()).unwrap()
}

/// In-memory account store with the same single-write-lock atomicity the
/// production adapter provides.
#[derive(Clone, Default)]
pub struct FakeAccountStore {
    accounts: Arc<RwLock<HashMap<Email, Account>>>,
}

impl FakeAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, email: &Email) -> Option<Account> {
        self.accounts.read().await.get(email).cloned()
    }

    pub async fn insert(&self, account: Account) {
        self.accounts
            .write()
            .await
            .insert(account.email().clone(), account);
    }
}

#[async_trait::async_trait]
impl AccountStore for FakeAccountStore {
    async fn add_account(&self, account: Account) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(account.email()) {
            return Err(AccountStoreError::AccountAlreadyExists);
        }
        accounts.insert(account.email().clone(), account);
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        self.accounts
            .read()
            .await
            .get(email)
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError> {
        self.accounts
            .read()
            .await
            .values()
            .find(|account| account.id() == *id)
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn consume_verification_secret(
        &self,
        secret: &VerificationSecret,
    ) -> Result<Account, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .values_mut()
            .find(|account| account.verification_secret() == Some(secret))
            .ok_or(AccountStoreError::AccountNotFound)?;
        account.mark_verified();
        Ok(account.clone())
    }

    async fn store_recovery_code(
        &self,
        id: &AccountId,
        code: RecoveryCode,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .values_mut()
            .find(|account| account.id() == *id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        account.set_recovery_code(code, expires_at);
        Ok(())
    }

    async fn exchange_recovery_code(
        &self,
        email: &Email,
        code: &RecoveryCode,
        now: DateTime<Utc>,
        token: RecoveryToken,
    ) -> Result<Account, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(email)
            .filter(|account| account.has_unexpired_recovery_code(code, now))
            .ok_or(AccountStoreError::AccountNotFound)?;
        account.install_recovery_token(token);
        Ok(account.clone())
    }

    async fn consume_recovery_token(
        &self,
        token: &RecoveryToken,
        new_hash: PasswordHash,
    ) -> Result<Account, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .values_mut()
            .find(|account| account.recovery_token() == Some(token))
            .ok_or(AccountStoreError::AccountNotFound)?;
        account.consume_recovery_token(new_hash);
        Ok(account.clone())
    }

    async fn set_password_hash(
        &self,
        id: &AccountId,
        new_hash: PasswordHash,
    ) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .values_mut()
            .find(|account| account.id() == *id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        account.set_password_hash(new_hash);
        Ok(())
    }
}

/// Deterministic stand-in for the argon2 adapter: `hash` prefixes the raw
/// password, `verify` compares against that prefix.
#[derive(Clone, Default)]
pub struct FakeHasher;

#[async_trait::async_trait]
impl PasswordHasher for FakeHasher {
    async fn hash(&self, raw: Password) -> Result<PasswordHash, PasswordHasherError> {
        Ok(PasswordHash::new(Secret::from(format!(
            "hashed:{}",
            raw.as_ref().expose_secret()
        ))))
    }

    async fn verify(
        &self,
        candidate: Password,
        expected: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let expected = expected.as_ref().expose_secret();
        Ok(expected == &format!("hashed:{}", candidate.as_ref().expose_secret()))
    }
}

#[derive(Clone, Debug)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub content: String,
}

/// Email client that records every message for later assertions.
#[derive(Clone, Default)]
pub struct RecordingEmailClient {
    pub sent: Arc<RwLock<Vec<SentMail>>>,
}

#[async_trait::async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        self.sent.write().await.push(SentMail {
            to: recipient.as_ref().expose_secret().clone(),
            subject: subject.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}

/// Email client whose delivery always fails, for the fire-and-forget paths.
#[derive(Clone, Default)]
pub struct FailingEmailClient;

#[async_trait::async_trait]
impl EmailClient for FailingEmailClient {
    async fn send_email(&self, _: &Email, _: &str, _: &str) -> Result<(), String> {
        Err("smtp unreachable".to_string())
    }
}

/// Transparent token issuer: the "signature" is just the serialized claims.
#[derive(Clone, Default)]
pub struct FakeTokenIssuer;

impl TokenIssuer for FakeTokenIssuer {
    fn sign(&self, account: &SanitizedAccount) -> Result<String, TokenIssuerError> {
        Ok(format!(
            "{}|{}",
            account.email.as_ref().expose_secret(),
            account.id
        ))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenIssuerError> {
        let (sub, sid) = token.split_once('|').ok_or(TokenIssuerError::InvalidToken)?;
        Ok(SessionClaims {
            sub: sub.to_string(),
            sid: sid.to_string(),
            exp: usize::MAX,
        })
    }
}
