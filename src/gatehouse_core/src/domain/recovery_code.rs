use rand::Rng;
use secrecy::{ExposeSecret, Secret};

use super::recovery_error::RecoveryError;

pub const RECOVERY_CODE_DIGITS: usize = 6;

/// Short numeric code mailed to the account address during the
/// forgotten-password flow. Uniform over the whole 6-digit range, so leading
/// zeroes are possible and the code carries its full ~20 bits.
#[derive(Debug, Clone)]
pub struct RecoveryCode(Secret<String>);

impl RecoveryCode {
    pub fn new() -> Self {
        let value = rand::rng().random_range(0..1_000_000u32);
        Self(Secret::from(format!("{value:06}")))
    }

    pub fn parse(raw: &str) -> Result<Self, RecoveryError> {
        if raw.len() != RECOVERY_CODE_DIGITS || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RecoveryError::MalformedCode);
        }
        Ok(Self(Secret::from(raw.to_string())))
    }
}

impl Default for RecoveryCode {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Secret<String>> for RecoveryCode {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for RecoveryCode {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for RecoveryCode {}
