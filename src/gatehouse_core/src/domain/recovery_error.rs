use thiserror::Error;

/// Parse failures for caller-supplied recovery material. Deliberately vague:
/// the messages must not help an attacker distinguish "wrong shape" from
/// "wrong value" downstream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecoveryError {
    #[error("Invalid recovery code")]
    MalformedCode,
    #[error("Invalid recovery token")]
    MalformedToken,
    #[error("Invalid verification secret")]
    MalformedSecret,
}
