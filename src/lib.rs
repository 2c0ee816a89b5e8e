//! Offline cryptographic toolkit.
//!
//! Five stateless components, leaves first: a random source, PBKDF2 key
//! derivation, an AES-256-GCM envelope, key-pair generation and digest/MAC
//! helpers. Every operation is a pure function over its inputs plus the OS
//! random generator; nothing here touches the filesystem or network.

pub mod crypto;
pub mod digest;
pub mod envelope;
pub mod error;
pub mod keygen;

pub use crate::crypto::{
    CIPHER_ALGORITHM, DEFAULT_ITERATIONS, KDF_ALGORITHM, KdfParams, RandomEncoding, derive_key,
    generate_salt, random_bytes, random_value,
};
pub use crate::digest::{DigestAlgorithm, OutputEncoding, hash, hmac};
pub use crate::envelope::{Envelope, KeySource, Keying};
pub use crate::error::{CryptoError, CryptoResult};
pub use crate::keygen::{
    GeneratedKey, KeyKind, KeyPairRecord, PasswordHashRecord, SymmetricKeyRecord, generate,
    hash_password, verify_password,
};
