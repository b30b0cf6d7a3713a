use secrecy::{ExposeSecret, Secret};

use super::recovery_error::RecoveryError;
use super::{is_lower_hex, random_hex};

const SECRET_BYTES: usize = 32;

/// One-time value embedded in the verification link at registration and
/// consumed exactly once when the address is confirmed.
#[derive(Debug, Clone)]
pub struct VerificationSecret(Secret<String>);

impl VerificationSecret {
    pub fn new() -> Self {
        Self(Secret::from(random_hex(SECRET_BYTES)))
    }

    pub fn parse(raw: &str) -> Result<Self, RecoveryError> {
        if !is_lower_hex(raw, SECRET_BYTES) {
            return Err(RecoveryError::MalformedSecret);
        }
        Ok(Self(Secret::from(raw.to_string())))
    }
}

impl Default for VerificationSecret {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Secret<String>> for VerificationSecret {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for VerificationSecret {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for VerificationSecret {}
