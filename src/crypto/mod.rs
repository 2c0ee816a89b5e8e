//! Cryptographic primitives: random source, key derivation, authenticated
//! encryption.
//!
//! Algorithm parameters live here as named constants so every component
//! agrees on them; the only run-time tunable (PBKDF2 iteration count)
//! travels inside [`KdfParams`] instead of mutable global state.

pub mod aead;
pub mod kdf;
pub mod random;

pub use kdf::{KdfParams, derive_key};
pub use random::{generate_salt, random_bytes, random_value, RandomEncoding};

/// Identifier of the authenticated cipher recorded in every envelope.
pub const CIPHER_ALGORITHM: &str = "aes-256-gcm";
/// Identifier of the key-derivation function recorded in password-keyed envelopes.
pub const KDF_ALGORITHM: &str = "pbkdf2-sha256";
/// Length of the symmetric key (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;
/// Length of the AES-GCM nonce (12 bytes / 96 bits).
pub const NONCE_LEN: usize = 12;
/// Length of the GCM authentication tag (16 bytes / 128 bits).
pub const TAG_LEN: usize = 16;
/// Length of the KDF salt (16 bytes / 128 bits).
pub const SALT_LEN: usize = 16;
/// Default PBKDF2 iteration count; the floor for new encryptions.
pub const DEFAULT_ITERATIONS: u32 = 600_000;
/// Upper bound on a single random-bytes request.
pub const MAX_RANDOM_BYTES: usize = 1024;
