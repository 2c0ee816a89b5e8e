//! Unkeyed hashing and keyed message authentication.
//!
//! Pure functions over their inputs; the only failure mode is an unknown
//! algorithm or encoding identifier, rejected before any digest work.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::str::FromStr;

use crate::error::{CryptoError, CryptoResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> CryptoResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha384" | "sha-384" => Ok(Self::Sha384),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            other => Err(CryptoError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEncoding {
    Hex,
    Base64,
    Base64Url,
}

impl OutputEncoding {
    pub fn encode(&self, bytes: &[u8]) -> String {
        match self {
            Self::Hex => hex::encode(bytes),
            Self::Base64 => STANDARD.encode(bytes),
            Self::Base64Url => URL_SAFE_NO_PAD.encode(bytes),
        }
    }
}

impl FromStr for OutputEncoding {
    type Err = CryptoError;

    fn from_str(s: &str) -> CryptoResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            "base64url" => Ok(Self::Base64Url),
            other => Err(CryptoError::UnsupportedEncoding(other.to_string())),
        }
    }
}

/// Hash `data`, rendered in `encoding`.
pub fn hash(data: &[u8], algorithm: DigestAlgorithm, encoding: OutputEncoding) -> String {
    let digest = match algorithm {
        DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        DigestAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
        DigestAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
    };
    encoding.encode(&digest)
}

/// Keyed MAC over `data`. Any key length is valid for HMAC.
pub fn hmac(
    data: &[u8],
    key: &[u8],
    algorithm: DigestAlgorithm,
    encoding: OutputEncoding,
) -> CryptoResult<String> {
    macro_rules! mac {
        ($digest:ty) => {{
            let mut mac = <Hmac<$digest> as Mac>::new_from_slice(key)
                .map_err(|_| CryptoError::Cipher("HMAC rejected the key"))?;
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }};
    }

    let bytes = match algorithm {
        DigestAlgorithm::Sha256 => mac!(Sha256),
        DigestAlgorithm::Sha384 => mac!(Sha384),
        DigestAlgorithm::Sha512 => mac!(Sha512),
    };
    Ok(encoding.encode(&bytes))
}
