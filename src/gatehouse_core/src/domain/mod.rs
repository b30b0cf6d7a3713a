pub mod account;
pub mod display_name;
pub mod email;
pub mod password;
pub mod recovery_code;
pub mod recovery_error;
pub mod recovery_token;
pub mod verification_secret;

use rand::Rng;

/// Hex-encoded string of `n_bytes` random bytes from the OS-seeded generator.
/// 32 bytes gives 256 bits of entropy, comfortably above the 128-bit floor
/// required for single-use secrets.
pub(crate) fn random_hex(n_bytes: usize) -> String {
    let mut rng = rand::rng();
    (0..n_bytes)
        .map(|_| format!("{:02x}", rng.random::<u8>()))
        .collect()
}

pub(crate) fn is_lower_hex(value: &str, n_bytes: usize) -> bool {
    value.len() == n_bytes * 2
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
