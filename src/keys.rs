//! Key management for the encrypted note store.
//!
//! Keys are stored and handled as url-safe base64 text of 32 raw bytes,
//! which is also the on-disk key file format. The cipher decodes them
//! back to raw bytes when sealing or opening the store.

use std::{fs, path::Path};

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use log::{debug, info};
use pbkdf2::pbkdf2_hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;

use crate::{Config, Result, StoreError};

/// Application-wide KDF salt. Fixed on purpose so the same password
/// always derives the same key, matching the historical store format.
/// This makes password keys precomputable across installs; a per-install
/// salt would break compatibility with existing stores.
pub const KDF_SALT: &[u8] = b"notestack_salt_2025";

/// PBKDF2-HMAC-SHA256 iteration count.
pub const KDF_ITERATIONS: u32 = 100_000;

const KEY_LEN: usize = 32;

/// Returns the encryption key for this configuration.
///
/// With a password, derives the key deterministically and touches no
/// files. Without one, reads the key file, generating and persisting a
/// fresh random key (creating the data directory) on first use.
pub fn get_or_create_key(config: &Config, password: Option<&str>) -> Result<Vec<u8>> {
    if let Some(password) = password {
        return Ok(derive_from_password(password));
    }

    fs::create_dir_all(&config.data_dir).map_err(|_| StoreError::Directory {
        path: config.data_dir.clone(),
    })?;

    let key_file = config.key_file();
    if let Some(key) = read_key_file(&key_file)? {
        debug!("Using existing key file: {}", key_file.display());
        return Ok(key);
    }

    let key = generate_key();
    fs::write(&key_file, &key).map_err(|e| StoreError::KeyAccess {
        message: format!("failed to write key file {}: {}", key_file.display(), e),
    })?;
    info!("Generated new key file: {}", key_file.display());
    Ok(key)
}

/// Derives a key from a password. Pure: same password, same key.
pub fn derive_from_password(password: &str) -> Vec<u8> {
    let mut raw = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), KDF_SALT, KDF_ITERATIONS, &mut raw);
    URL_SAFE.encode(raw).into_bytes()
}

/// Generates a fresh random key in the stored (base64) form.
pub fn generate_key() -> Vec<u8> {
    let mut raw = [0u8; KEY_LEN];
    OsRng.fill_bytes(&mut raw);
    URL_SAFE.encode(raw).into_bytes()
}

/// Reads a key file, returning `Ok(None)` when it does not exist.
pub(crate) fn read_key_file(path: &Path) -> Result<Option<Vec<u8>>> {
    if !path.exists() {
        return Ok(None);
    }
    fs::read(path).map(Some).map_err(|e| StoreError::KeyAccess {
        message: format!("failed to read key file {}: {}", path.display(), e),
    })
}
