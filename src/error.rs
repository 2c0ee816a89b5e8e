use thiserror::Error;

use crate::crypto::{KEY_LEN, MAX_RANDOM_BYTES};

pub type CryptoResult<T> = Result<T, CryptoError>;

/// Failures of the cryptographic core.
///
/// Every validation variant is raised before any primitive work begins.
/// `AuthenticationFailure` is deliberately undifferentiated: distinguishing a
/// wrong key from tampered data would hand an oracle to attackers.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("raw key must be {n} hexadecimal characters", n = KEY_LEN * 2)]
    InvalidHexEncoding,

    #[error("envelope has no salt; cannot derive a key from a password")]
    MissingSalt,

    #[error("incorrect password or corrupted data")]
    AuthenticationFailure,

    #[error("unsupported key size: {0} bits")]
    InvalidKeySize(u32),

    #[error("a non-empty password is required")]
    MissingPassword,

    #[error("unsupported algorithm: '{0}'")]
    UnsupportedAlgorithm(String),

    #[error("unsupported output encoding: '{0}'")]
    UnsupportedEncoding(String),

    #[error("byte count must be between 1 and {max}, got {0}", max = MAX_RANDOM_BYTES)]
    InvalidByteCount(usize),

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(&'static str),

    #[error("malformed password-hash string")]
    MalformedPasswordHash,

    #[error("OS random generator unavailable")]
    RandomSource,

    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("cipher failure: {0}")]
    Cipher(&'static str),
}
