use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use getrandom::fill;
use std::fmt::Write;
use std::str::FromStr;

use super::{MAX_RANDOM_BYTES, SALT_LEN};
use crate::error::{CryptoError, CryptoResult};

/// Words for pronounceable passphrases. Short relative to 2^16, so indexing
/// each 16-bit chunk modulo the length introduces no meaningful bias.
const WORDLIST: &[&str] = &[
    "acorn", "amber", "anchor", "apple", "arrow", "aspen", "badge", "basil",
    "beacon", "birch", "blaze", "breeze", "brick", "brook", "candle", "canyon",
    "cedar", "cliff", "clover", "coral", "crane", "creek", "dawn", "delta",
    "drift", "eagle", "ember", "fable", "falcon", "fern", "flint", "frost",
    "gale", "glade", "grove", "harbor", "hazel", "heron", "hollow", "ivory",
    "jade", "juniper", "kestrel", "lagoon", "lantern", "larch", "lilac", "linden",
    "maple", "marsh", "meadow", "mist", "moss", "north", "oasis", "ochre",
    "onyx", "orchard", "osprey", "otter", "pebble", "pine", "plume", "prairie",
    "quartz", "raven", "reed", "ridge", "river", "rowan", "sable", "sage",
    "shale", "slate", "sparrow", "spruce", "stone", "summit", "thistle", "tide",
    "timber", "topaz", "trail", "tundra", "valley", "violet", "walnut", "willow",
    "wren", "yarrow",
];

/// Fill buffer with cryptographically secure random bytes
pub(crate) fn secure_random(buf: &mut [u8]) -> CryptoResult<()> {
    fill(buf).map_err(|_| CryptoError::RandomSource)
}

/// Generate a fresh random KDF salt
pub fn generate_salt() -> CryptoResult<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    secure_random(&mut salt)?;
    Ok(salt)
}

/// Draw `n` random bytes from the OS generator. Bounded to 1..=1024 so a
/// confused caller cannot request a pathological allocation.
pub fn random_bytes(n: usize) -> CryptoResult<Vec<u8>> {
    if n == 0 || n > MAX_RANDOM_BYTES {
        return Err(CryptoError::InvalidByteCount(n));
    }
    let mut buf = vec![0u8; n];
    secure_random(&mut buf)?;
    Ok(buf)
}

/// Output encodings for random values. All are pure transforms of the raw
/// bytes; none re-enters the random source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomEncoding {
    Hex,
    Base64,
    Base64Url,
    Binary,
    Decimal,
    Uuid,
    Passphrase,
}

impl FromStr for RandomEncoding {
    type Err = CryptoError;

    fn from_str(s: &str) -> CryptoResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            "base64url" => Ok(Self::Base64Url),
            "binary" => Ok(Self::Binary),
            "decimal" => Ok(Self::Decimal),
            "uuid" => Ok(Self::Uuid),
            "passphrase" | "words" => Ok(Self::Passphrase),
            other => Err(CryptoError::UnsupportedEncoding(other.to_string())),
        }
    }
}

/// Produce one random value of `n` bytes rendered in `encoding`.
///
/// The UUID encoding always consumes exactly 16 bytes (a v4 UUID has no other
/// size); the requested count is still bounds-checked so the call sites share
/// one validation path.
pub fn random_value(n: usize, encoding: RandomEncoding) -> CryptoResult<String> {
    if n == 0 || n > MAX_RANDOM_BYTES {
        return Err(CryptoError::InvalidByteCount(n));
    }
    let bytes = match encoding {
        RandomEncoding::Uuid => random_bytes(16)?,
        _ => random_bytes(n)?,
    };
    Ok(encode_random(&bytes, encoding))
}

fn encode_random(bytes: &[u8], encoding: RandomEncoding) -> String {
    match encoding {
        RandomEncoding::Hex => hex::encode(bytes),
        RandomEncoding::Base64 => STANDARD.encode(bytes),
        RandomEncoding::Base64Url => URL_SAFE_NO_PAD.encode(bytes),
        RandomEncoding::Binary => {
            let mut out = String::with_capacity(bytes.len() * 8);
            for b in bytes {
                let _ = write!(out, "{b:08b}");
            }
            out
        }
        RandomEncoding::Decimal => bytes
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(","),
        RandomEncoding::Uuid => {
            let mut raw = [0u8; 16];
            raw.copy_from_slice(&bytes[..16]);
            uuid::Builder::from_random_bytes(raw).into_uuid().to_string()
        }
        RandomEncoding::Passphrase => bytes
            .chunks(2)
            .map(|chunk| {
                let v = chunk.iter().fold(0u16, |acc, &b| (acc << 8) | u16::from(b));
                WORDLIST[v as usize % WORDLIST.len()]
            })
            .collect::<Vec<_>>()
            .join("-"),
    }
}
