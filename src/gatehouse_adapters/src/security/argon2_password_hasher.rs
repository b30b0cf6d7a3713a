use argon2::{
    Algorithm, Argon2, Params, PasswordVerifier, Version,
    password_hash::{PasswordHash as PhcString, PasswordHasher as _, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};

use gatehouse_core::{Password, PasswordHash, PasswordHasher, PasswordHasherError};

/// Argon2id cost parameters. The defaults follow the OWASP low-memory
/// recommendation; tests override them to keep runs fast.
#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct HasherParams {
    pub m_cost: u32,
    pub t_cost: u32,
    pub p_cost: u32,
}

impl Default for HasherParams {
    fn default() -> Self {
        Self {
            m_cost: 15000,
            t_cost: 2,
            p_cost: 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    params: HasherParams,
}

impl Argon2PasswordHasher {
    pub fn new(params: HasherParams) -> Self {
        Self { params }
    }
}

fn build_argon2(params: HasherParams) -> Result<Argon2<'static>, PasswordHasherError> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(params.m_cost, params.t_cost, params.p_cost, None)
            .map_err(|e| PasswordHasherError::HashingFailed(e.to_string()))?,
    ))
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError> {
        let params = self.params;
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt = SaltString::generate(rand_core::OsRng);
                build_argon2(params)?
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|hash| PasswordHash::new(Secret::new(hash.to_string())))
                    .map_err(|e| PasswordHasherError::HashingFailed(e.to_string()))
            })
        })
        .await
        .map_err(|e| PasswordHasherError::HashingFailed(e.to_string()))?
    }

    #[tracing::instrument(name = "Verifying password hash", skip_all)]
    async fn verify(
        &self,
        candidate: Password,
        expected: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let params = self.params;
        let expected = expected.as_ref().expose_secret().clone();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let expected = PhcString::new(&expected)
                    .map_err(|e| PasswordHasherError::HashingFailed(e.to_string()))?;

                match build_argon2(params)?
                    .verify_password(candidate.as_ref().expose_secret().as_bytes(), &expected)
                {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(PasswordHasherError::HashingFailed(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| PasswordHasherError::HashingFailed(e.to_string()))?
    }
}
