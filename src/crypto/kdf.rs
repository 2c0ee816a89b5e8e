use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use super::{DEFAULT_ITERATIONS, KEY_LEN, SALT_LEN};

/// PBKDF2 parameters carried alongside every password-keyed envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl KdfParams {
    /// Parameters with an explicit iteration count. Used when reproducing a
    /// key from an envelope, which must honour whatever count it recorded.
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    /// Parameters for a fresh encryption. The requested count is clamped up
    /// to the default floor: raising the work factor is allowed, silently
    /// weakening it is not.
    pub fn for_encryption(requested: Option<u32>) -> Self {
        Self {
            iterations: requested.unwrap_or(DEFAULT_ITERATIONS).max(DEFAULT_ITERATIONS),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

/// Derive a 256-bit key from a password and salt via PBKDF2-HMAC-SHA256.
///
/// The salt must be freshly random per derivation when encrypting; reusing
/// one is only legitimate when reproducing the key for an existing envelope.
pub fn derive_key(password: &str, salt: &[u8; SALT_LEN], kdf: KdfParams) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, kdf.iterations, key.as_mut());
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kdf_is_deterministic() {
        let salt = [42u8; 16];
        let kdf = KdfParams::new(1_000);

        let k1 = derive_key("password", &salt, kdf);
        let k2 = derive_key("password", &salt, kdf);

        assert_eq!(*k1, *k2);
    }

    #[test]
    fn iterations_affect_output() {
        let salt = [7u8; 16];

        let k1 = derive_key("pw", &salt, KdfParams::new(1_000));
        let k2 = derive_key("pw", &salt, KdfParams::new(2_000));

        assert_ne!(*k1, *k2);
    }

    #[test]
    fn salt_affects_output() {
        let k1 = derive_key("pw", &[1u8; 16], KdfParams::new(1_000));
        let k2 = derive_key("pw", &[2u8; 16], KdfParams::new(1_000));

        assert_ne!(*k1, *k2);
    }

    #[test]
    fn encryption_params_never_drop_below_the_floor() {
        assert_eq!(
            KdfParams::for_encryption(Some(1_000)).iterations(),
            DEFAULT_ITERATIONS
        );
        assert_eq!(
            KdfParams::for_encryption(None).iterations(),
            DEFAULT_ITERATIONS
        );
        assert_eq!(
            KdfParams::for_encryption(Some(1_000_000)).iterations(),
            1_000_000
        );
    }

    #[test]
    fn known_vector_matches_pbkdf2_sha256() {
        // RFC 7914 test vector: PBKDF2-HMAC-SHA256("passwd", "salt", 1, 64),
        // truncated to our 32-byte output.
        let mut got = [0u8; KEY_LEN];
        pbkdf2_hmac::<Sha256>(b"passwd", b"salt", 1, &mut got);
        assert_eq!(
            hex::encode(got),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }
}
