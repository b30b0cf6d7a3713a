use secrecy::{ExposeSecret, Secret};

use super::recovery_error::RecoveryError;
use super::{is_lower_hex, random_hex};

const TOKEN_BYTES: usize = 32;

/// Opaque one-time token handed out when a recovery code is verified and
/// consumed by the password reset that follows. Carries no expiry of its own;
/// single use is enforced by the atomic consume in the store.
#[derive(Debug, Clone)]
pub struct RecoveryToken(Secret<String>);

impl RecoveryToken {
    pub fn new() -> Self {
        Self(Secret::from(random_hex(TOKEN_BYTES)))
    }

    pub fn parse(raw: &str) -> Result<Self, RecoveryError> {
        if !is_lower_hex(raw, TOKEN_BYTES) {
            return Err(RecoveryError::MalformedToken);
        }
        Ok(Self(Secret::from(raw.to_string())))
    }
}

impl Default for RecoveryToken {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Secret<String>> for RecoveryToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for RecoveryToken {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for RecoveryToken {}
