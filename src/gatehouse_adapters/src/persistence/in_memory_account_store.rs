use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use gatehouse_core::{
    Account, AccountId, AccountStore, AccountStoreError, Email, PasswordHash, RecoveryCode,
    RecoveryToken, VerificationSecret,
};

/// Account store backed by a single in-process map. Every conditional update
/// holds the write lock for the whole match-then-mutate step, so a secret or
/// code submitted twice concurrently is honored exactly once.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<Email, Account>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn add_account(&self, account: Account) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(account.email()) {
            return Err(AccountStoreError::AccountAlreadyExists);
        }
        accounts.insert(account.email().clone(), account);
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .get(email)
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
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
