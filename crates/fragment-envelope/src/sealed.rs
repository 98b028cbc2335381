//! Symmetric AEAD seal/open for share envelopes.
//!
//! AES-256-GCM with a fresh random nonce per seal. Sealed layout:
//! `[nonce (12 bytes)][ciphertext + tag]`. The 32-byte key is generated
//! per envelope and travels inside the artifact (see the crate docs for
//! what that does and does not buy).

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use rand::RngCore;
use thiserror::Error;

/// Symmetric key length
pub const KEY_LEN: usize = 32;

/// Nonce length for AES-256-GCM
const NONCE_LEN: usize = 12;

/// GCM authentication tag length
const TAG_LEN: usize = 16;

#[derive(Error, Debug)]
pub enum SealedError {
    #[error("sealed data is truncated")]
    Truncated,
    #[error("authentication failed: data is corrupted or tampered")]
    Authenticity,
    #[error("sealing failed: {0}")]
    Seal(String),
}

/// Generate a fresh single-use key from the OS CSPRNG.
pub fn keygen() -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    OsRng.fill_bytes(&mut key);
    key
}

/// Authenticated-encrypt `plaintext` under `key` with a fresh nonce.
pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<Vec<u8>, SealedError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| SealedError::Seal(e.to_string()))?;

    let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Authenticated-decrypt data produced by [`seal`].
///
/// Truncation and authenticity failures surface as distinct variants, but
/// callers treating both as untrusted input is the intended use.
pub fn open(key: &[u8; KEY_LEN], data: &[u8]) -> Result<Vec<u8>, SealedError> {
    if data.len() < NONCE_LEN + TAG_LEN {
        return Err(SealedError::Truncated);
    }

    let (nonce, ciphertext) = data.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| SealedError::Authenticity)
}
