use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, KeyInit},
};
use zeroize::Zeroizing;

use super::random::secure_random;
use super::{KEY_LEN, NONCE_LEN, TAG_LEN};
use crate::error::{CryptoError, CryptoResult};

/// Encrypt plaintext under AES-256-GCM with a fresh random 96-bit nonce.
///
/// Returns the nonce, the ciphertext and the detached 128-bit tag. A nonce is
/// never reused: every call draws a new one from the OS generator.
pub fn encrypt(
    key: &[u8; KEY_LEN],
    plaintext: &[u8],
) -> CryptoResult<([u8; NONCE_LEN], Vec<u8>, [u8; TAG_LEN])> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    let mut nonce = [0u8; NONCE_LEN];
    secure_random(&mut nonce)?;

    // The aead API appends the tag to the ciphertext; split it back off so
    // the envelope can carry it as its own field.
    let mut sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| CryptoError::Cipher("AES-GCM encryption failed"))?;

    let split = sealed.len() - TAG_LEN;
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&sealed[split..]);
    sealed.truncate(split);

    Ok((nonce, sealed, tag))
}

/// Decrypt and verify. Any verification failure, whether from a wrong key,
/// a flipped ciphertext bit or a forged tag, collapses into the single
/// `AuthenticationFailure` error.
pub fn decrypt(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    tag: &[u8; TAG_LEN],
    ciphertext: &[u8],
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    let mut sealed = Vec::with_capacity(ciphertext.len() + TAG_LEN);
    sealed.extend_from_slice(ciphertext);
    sealed.extend_from_slice(tag);

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), sealed.as_slice())
        .map_err(|_| CryptoError::AuthenticationFailure)?;
    Ok(Zeroizing::new(plaintext))
}
