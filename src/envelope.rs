//! The authenticated-encryption envelope: the unit of interchange for
//! symmetric encryption.
//!
//! An envelope is either *password-keyed* (it carries the salt, KDF id and
//! iteration count needed to re-derive the key) or *raw-keyed* (it carries
//! nothing but the cipher output). The two shapes are a sum type so a
//! partially-filled derivation block cannot be represented.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::crypto::{
    CIPHER_ALGORITHM, KDF_ALGORITHM, KEY_LEN, KdfParams, NONCE_LEN, SALT_LEN, TAG_LEN, aead,
    derive_key, generate_salt,
};
use crate::error::{CryptoError, CryptoResult};

/// Where the symmetric key comes from.
pub enum KeySource {
    /// Derive the key from a password. `iterations` only matters when
    /// encrypting (and never below the default floor); decryption always
    /// honours the envelope's recorded count.
    Password {
        password: Zeroizing<String>,
        iterations: Option<u32>,
    },
    /// A raw 256-bit key as 64 hex characters.
    RawHex(String),
}

impl KeySource {
    pub fn password(password: impl Into<String>) -> Self {
        Self::Password {
            password: Zeroizing::new(password.into()),
            iterations: None,
        }
    }

    pub fn raw_hex(key: impl Into<String>) -> Self {
        Self::RawHex(key.into())
    }
}

/// Key material recorded in the envelope: everything or nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Keying {
    Password {
        /// Base64 of the fresh 128-bit KDF salt.
        salt: String,
        /// KDF identifier, `pbkdf2-sha256`.
        kdf: String,
        iterations: u32,
    },
    Raw {},
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope {
    pub algorithm: String,
    /// Base64 of the 96-bit nonce.
    pub nonce: String,
    /// Base64 of the 128-bit authentication tag.
    pub tag: String,
    /// Base64 of the ciphertext.
    pub ciphertext: String,
    #[serde(flatten)]
    pub keying: Keying,
}

impl Envelope {
    /// Encrypt `plaintext` into a fresh envelope.
    ///
    /// Password sources derive a key from a fresh random salt and record the
    /// derivation parameters; raw keys leave the envelope bare. Empty
    /// plaintext is valid input.
    pub fn encrypt(plaintext: &str, source: &KeySource) -> CryptoResult<Self> {
        let (key, keying) = match source {
            KeySource::Password {
                password,
                iterations,
            } => {
                let salt = generate_salt()?;
                let kdf = KdfParams::for_encryption(*iterations);
                let key = derive_key(password, &salt, kdf);
                let keying = Keying::Password {
                    salt: STANDARD.encode(salt),
                    kdf: KDF_ALGORITHM.to_string(),
                    iterations: kdf.iterations(),
                };
                (key, keying)
            }
            KeySource::RawHex(hex_key) => (parse_raw_key(hex_key)?, Keying::Raw {}),
        };

        let (nonce, ciphertext, tag) = aead::encrypt(&key, plaintext.as_bytes())?;

        Ok(Self {
            algorithm: CIPHER_ALGORITHM.to_string(),
            nonce: STANDARD.encode(nonce),
            tag: STANDARD.encode(tag),
            ciphertext: STANDARD.encode(ciphertext),
            keying,
        })
    }

    /// Decrypt this envelope back to text.
    ///
    /// A password source requires the envelope to carry its derivation
    /// parameters; a raw key must be exactly 64 hex characters. Every
    /// verification failure surfaces as the one undifferentiated
    /// `AuthenticationFailure`.
    pub fn decrypt(&self, source: &KeySource) -> CryptoResult<String> {
        if self.algorithm != CIPHER_ALGORITHM {
            return Err(CryptoError::UnsupportedAlgorithm(self.algorithm.clone()));
        }

        let key = match source {
            KeySource::Password { password, .. } => match &self.keying {
                Keying::Password {
                    salt, iterations, ..
                } => {
                    let salt =
                        decode_fixed::<SALT_LEN>(salt, "salt is not a valid 16-byte base64 value")?;
                    derive_key(password, &salt, KdfParams::new(*iterations))
                }
                Keying::Raw {} => return Err(CryptoError::MissingSalt),
            },
            KeySource::RawHex(hex_key) => parse_raw_key(hex_key)?,
        };

        let nonce =
            decode_fixed::<NONCE_LEN>(&self.nonce, "nonce is not a valid 12-byte base64 value")?;
        let tag = decode_fixed::<TAG_LEN>(&self.tag, "tag is not a valid 16-byte base64 value")?;
        let ciphertext = STANDARD
            .decode(&self.ciphertext)
            .map_err(|_| CryptoError::MalformedEnvelope("ciphertext is not valid base64"))?;

        let plaintext = aead::decrypt(&key, &nonce, &tag, &ciphertext)?;
        String::from_utf8(plaintext.to_vec())
            .map_err(|_| CryptoError::MalformedEnvelope("plaintext is not valid UTF-8"))
    }
}

/// Validate and decode a raw hex key: charset first, then exact length, then
/// bytes. Nothing touches the cipher until both checks pass.
fn parse_raw_key(hex_key: &str) -> CryptoResult<Zeroizing<[u8; KEY_LEN]>> {
    if hex_key.is_empty() || !hex_key.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CryptoError::InvalidHexEncoding);
    }
    if hex_key.len() != KEY_LEN * 2 {
        return Err(CryptoError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: hex_key.len() / 2,
        });
    }
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    hex::decode_to_slice(hex_key, key.as_mut()).map_err(|_| CryptoError::InvalidHexEncoding)?;
    Ok(key)
}

fn decode_fixed<const N: usize>(b64: &str, what: &'static str) -> CryptoResult<[u8; N]> {
    let bytes = STANDARD
        .decode(b64)
        .map_err(|_| CryptoError::MalformedEnvelope(what))?;
    bytes
        .try_into()
        .map_err(|_| CryptoError::MalformedEnvelope(what))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_key() -> KeySource {
        KeySource::raw_hex("00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff")
    }

    #[test]
    fn raw_key_roundtrip() {
        let envelope = Envelope::encrypt("secret message", &raw_key()).unwrap();
        assert_eq!(envelope.keying, Keying::Raw {});
        assert_eq!(envelope.decrypt(&raw_key()).unwrap(), "secret message");
    }

    #[test]
    fn password_roundtrip_records_derivation_params() {
        let source = KeySource::Password {
            password: Zeroizing::new("mypassword".into()),
            iterations: Some(1_000_000),
        };
        let envelope = Envelope::encrypt("secret message", &source).unwrap();

        match &envelope.keying {
            Keying::Password {
                salt,
                kdf,
                iterations,
            } => {
                assert!(!salt.is_empty());
                assert_eq!(kdf, "pbkdf2-sha256");
                assert_eq!(*iterations, 1_000_000);
            }
            Keying::Raw {} => panic!("expected password keying"),
        }

        assert_eq!(envelope.decrypt(&source).unwrap(), "secret message");
    }

    #[test]
    fn empty_and_unicode_plaintexts_roundtrip() {
        for text in ["", "héllo wörld \u{1F512}", &"long ".repeat(4096)] {
            let envelope = Envelope::encrypt(text, &raw_key()).unwrap();
            assert_eq!(envelope.decrypt(&raw_key()).unwrap(), text);
        }
    }

    #[test]
    fn two_encryptions_never_share_a_nonce() {
        let a = Envelope::encrypt("same", &raw_key()).unwrap();
        let b = Envelope::encrypt("same", &raw_key()).unwrap();
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn wrong_raw_key_is_undifferentiated_auth_failure() {
        let envelope = Envelope::encrypt("payload", &raw_key()).unwrap();
        let other =
            KeySource::raw_hex("ffeeddccbbaa99887766554433221100ffeeddccbbaa99887766554433221100");
        assert!(matches!(
            envelope.decrypt(&other),
            Err(CryptoError::AuthenticationFailure)
        ));
    }

    #[test]
    fn tampered_ciphertext_is_auth_failure() {
        let mut envelope = Envelope::encrypt("payload", &raw_key()).unwrap();
        let mut bytes = STANDARD.decode(&envelope.ciphertext).unwrap();
        bytes[0] ^= 0x01;
        envelope.ciphertext = STANDARD.encode(bytes);
        assert!(matches!(
            envelope.decrypt(&raw_key()),
            Err(CryptoError::AuthenticationFailure)
        ));
    }

    #[test]
    fn password_decrypt_without_salt_is_missing_salt() {
        let envelope = Envelope::encrypt("payload", &raw_key()).unwrap();
        assert!(matches!(
            envelope.decrypt(&KeySource::password("pw")),
            Err(CryptoError::MissingSalt)
        ));
    }

    #[test]
    fn raw_key_charset_checked_before_length() {
        let envelope = Envelope::encrypt("payload", &raw_key()).unwrap();

        // Non-hex characters, correct length.
        let garbage = "zz".repeat(32);
        assert!(matches!(
            envelope.decrypt(&KeySource::raw_hex(garbage)),
            Err(CryptoError::InvalidHexEncoding)
        ));

        // Valid hex, wrong length.
        assert!(matches!(
            envelope.decrypt(&KeySource::raw_hex("aabb")),
            Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 2
            })
        ));
    }

    #[test]
    fn raw_key_is_case_insensitive() {
        let upper =
            KeySource::raw_hex("00112233445566778899AABBCCDDEEFF00112233445566778899AABBCCDDEEFF");
        let envelope = Envelope::encrypt("payload", &upper).unwrap();
        assert_eq!(envelope.decrypt(&raw_key()).unwrap(), "payload");
    }

    #[test]
    fn json_shape_is_flat() {
        let envelope = Envelope::encrypt("x", &KeySource::password("pw")).unwrap();
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["algorithm"], "aes-256-gcm");
        for field in ["nonce", "tag", "ciphertext", "salt", "kdf", "iterations"] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }

        let raw = Envelope::encrypt("x", &raw_key()).unwrap();
        let json = serde_json::to_value(&raw).unwrap();
        assert!(json.get("salt").is_none());
        assert!(json.get("kdf").is_none());
        assert!(json.get("iterations").is_none());
    }

    #[test]
    fn partial_derivation_block_parses_as_raw_keyed() {
        // salt without iterations: the sum type refuses the partial shape,
        // so password decryption reports the missing salt.
        let json = r#"{"algorithm":"aes-256-gcm","nonce":"AAAAAAAAAAAAAAAA",
            "tag":"AAAAAAAAAAAAAAAAAAAAAA==","ciphertext":"",
            "salt":"AAAAAAAAAAAAAAAAAAAAAA=="}"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.keying, Keying::Raw {});
    }
}
