//! Asymmetric payload encryption collaborator, backed by age X25519.
//!
//! The identity is single-use: generated fresh per encrypt operation, its
//! printable secret string is what gets threshold-split, and it is never
//! written anywhere else.

use age::secrecy::ExposeSecret;
use age::x25519::{Identity, Recipient};
use std::io::{Read, Write};
use std::iter;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("payload encryption failed: {0}")]
    Encrypt(String),
    /// Wrong identity and corrupted ciphertext are deliberately not
    /// distinguished.
    #[error("payload decryption failed")]
    Decrypt,
    #[error("recovered secret is not a valid identity")]
    MalformedIdentity,
}

/// Generate a fresh X25519 identity.
pub fn generate() -> Identity {
    Identity::generate()
}

/// The identity's serialized secret material: the printable
/// `AGE-SECRET-KEY-1…` string as bytes. This is the byte sequence that
/// gets split into shares.
pub fn secret_bytes(identity: &Identity) -> Vec<u8> {
    identity.to_string().expose_secret().as_bytes().to_vec()
}

/// Parse an identity back from recovered secret bytes.
pub fn from_secret_bytes(secret: &[u8]) -> Result<Identity, IdentityError> {
    let s = std::str::from_utf8(secret).map_err(|_| IdentityError::MalformedIdentity)?;
    s.parse::<Identity>()
        .map_err(|_| IdentityError::MalformedIdentity)
}

/// Encrypt bytes to a recipient, producing a self-contained age ciphertext.
pub fn encrypt(recipient: &Recipient, plaintext: &[u8]) -> Result<Vec<u8>, IdentityError> {
    let encryptor = age::Encryptor::with_recipients(vec![Box::new(recipient.clone())])
        .ok_or_else(|| IdentityError::Encrypt("no recipients".into()))?;

    let mut out = Vec::new();
    let mut writer = encryptor
        .wrap_output(&mut out)
        .map_err(|e| IdentityError::Encrypt(e.to_string()))?;
    writer
        .write_all(plaintext)
        .map_err(|e| IdentityError::Encrypt(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IdentityError::Encrypt(e.to_string()))?;

    Ok(out)
}

/// Decrypt an age ciphertext with the matching identity.
pub fn decrypt(identity: &Identity, ciphertext: &[u8]) -> Result<Vec<u8>, IdentityError> {
    let decryptor = match age::Decryptor::new(ciphertext).map_err(|_| IdentityError::Decrypt)? {
        age::Decryptor::Recipients(d) => d,
        // fragment never produces passphrase-encrypted payloads
        _ => return Err(IdentityError::Decrypt),
    };

    let mut reader = decryptor
        .decrypt(iter::once(identity as &dyn age::Identity))
        .map_err(|_| IdentityError::Decrypt)?;

    let mut out = Vec::new();
    reader
        .read_to_end(&mut out)
        .map_err(|_| IdentityError::Decrypt)?;
    Ok(out)
}
