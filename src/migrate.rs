//! Recovery of note data left behind by older versions.
//!
//! Older builds wrote the store either to a `data` directory next to
//! the launch directory, or — on Windows — under an `%APPDATA%` that a
//! sandbox may have redirected away from the real profile path. Each
//! candidate is opened with the same three-tier tolerance as the store
//! itself: its own key file, then the current key, then plaintext.

use std::{fs, path::Path};

use log::{debug, info, warn};

use crate::{keys, storage, Config, Note, STORE_FILE_NAME, KEY_FILE_NAME};

/// Searches the legacy locations and returns whatever note data the
/// first readable candidate holds, empty when there is none.
///
/// When a recovered candidate has its own key file, that key is
/// adopted as the canonical one before the caller re-persists the
/// notes, so the rewritten store stays openable with it.
pub(crate) fn find_and_import(config: &Config) -> Vec<Note> {
    for dir in candidate_dirs(config) {
        let store_file = dir.join(STORE_FILE_NAME);
        if !store_file.exists() {
            continue;
        }
        debug!("Trying legacy store at {}", store_file.display());

        let bytes = match fs::read(&store_file) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(
                    "Failed to read legacy store {}: {}",
                    store_file.display(),
                    e
                );
                continue;
            }
        };

        let legacy_key_file = dir.join(KEY_FILE_NAME);

        // Tier 1: the key file that shipped with the legacy store.
        if let Ok(Some(legacy_key)) = keys::read_key_file(&legacy_key_file) {
            if let Ok(notes) = storage::decode_encrypted(&bytes, &legacy_key) {
                info!(
                    "Recovered {} notes from {} with its own key",
                    notes.len(),
                    store_file.display()
                );
                adopt_legacy_key(config, &legacy_key_file);
                return notes;
            }
        }

        // Tier 2: the current key.
        if let Ok(key) = keys::get_or_create_key(config, None) {
            if let Ok(notes) = storage::decode_encrypted(&bytes, &key) {
                info!(
                    "Recovered {} notes from {} with the current key",
                    notes.len(),
                    store_file.display()
                );
                return notes;
            }
        }

        // Tier 3: unencrypted legacy data.
        if let Ok(notes) = storage::decode_plaintext(&bytes) {
            info!(
                "Recovered {} notes from plaintext store {}",
                notes.len(),
                store_file.display()
            );
            if legacy_key_file.exists() {
                adopt_legacy_key(config, &legacy_key_file);
            }
            return notes;
        }

        debug!(
            "Legacy store {} is unreadable in any known format",
            store_file.display()
        );
    }

    Vec::new()
}

/// Candidate legacy directories worth inspecting, in priority order.
fn candidate_dirs(config: &Config) -> impl Iterator<Item = &Path> + '_ {
    config
        .legacy_dirs
        .iter()
        .map(|dir| dir.as_path())
        .filter(move |dir| *dir != config.data_dir.as_path() && dir.is_dir())
}

/// Copies a legacy key file verbatim over the canonical one.
///
/// Deliberately unconditional: migration always prefers the key that
/// opened the recovered data, even when a canonical key file already
/// exists. A user with a fresh canonical key and unrelated legacy
/// leftovers loses that fresh key here.
fn adopt_legacy_key(config: &Config, legacy_key_file: &Path) {
    let canonical = config.key_file();
    if canonical.exists() {
        warn!(
            "Replacing existing key file {} with legacy key {}",
            canonical.display(),
            legacy_key_file.display()
        );
    }
    if let Err(e) = fs::create_dir_all(&config.data_dir) {
        warn!(
            "Failed to create data directory {}: {}",
            config.data_dir.display(),
            e
        );
        return;
    }
    match fs::copy(legacy_key_file, &canonical) {
        Ok(_) => info!(
            "Adopted legacy key file {} as {}",
            legacy_key_file.display(),
            canonical.display()
        ),
        Err(e) => warn!(
            "Failed to adopt legacy key file {}: {}",
            legacy_key_file.display(),
            e
        ),
    }
}
