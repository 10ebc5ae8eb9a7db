//! Authenticated encryption for the store blob.
//!
//! AES-256-GCM with a random 96-bit nonce prepended to the ciphertext,
//! so the envelope is self-contained: callers hand over opaque bytes
//! and a key, nothing else. Any authentication, format, or UTF-8
//! failure on the way back out is a [`StoreError::Decryption`], which
//! is the signal the store uses to fall through its compatibility
//! chain.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use rand::RngCore;

use crate::{Result, StoreError};

const NONCE_LEN: usize = 12;

/// Encrypts a UTF-8 payload under the given (base64-form) key.
pub fn encrypt(plaintext: &str, key: &[u8]) -> Result<Vec<u8>> {
    let cipher = build_cipher(key)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| StoreError::Encryption {
            message: e.to_string(),
        })?;

    let mut blob = nonce_bytes.to_vec();
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypts a blob produced by [`encrypt`] back to its UTF-8 payload.
pub fn decrypt(blob: &[u8], key: &[u8]) -> Result<String> {
    let cipher = build_cipher(key)?;

    if blob.len() < NONCE_LEN {
        return Err(StoreError::Decryption {
            message: "ciphertext too short to contain a nonce".to_string(),
        });
    }

    let nonce = Nonce::from_slice(&blob[..NONCE_LEN]);
    let plaintext = cipher
        .decrypt(nonce, &blob[NONCE_LEN..])
        .map_err(|_| StoreError::Decryption {
            message: "authentication failed".to_string(),
        })?;

    String::from_utf8(plaintext).map_err(|_| StoreError::Decryption {
        message: "decrypted payload is not valid UTF-8".to_string(),
    })
}

fn build_cipher(key: &[u8]) -> Result<Aes256Gcm> {
    let raw = URL_SAFE.decode(key).map_err(|_| StoreError::KeyAccess {
        message: "key is not valid base64".to_string(),
    })?;
    Aes256Gcm::new_from_slice(&raw).map_err(|_| StoreError::KeyAccess {
        message: "key must decode to 32 bytes".to_string(),
    })
}
