//! Manages the persistence of the note collection.
//!
//! The whole collection is one encrypted blob in one file. Loading
//! walks an ordered chain of decoders: current encrypted format, then
//! legacy plaintext (with a silent upgrade rewrite), then migration
//! from legacy locations, and finally an empty collection. Neither
//! `load` nor `save` ever surfaces an error to the caller; failures are
//! logged here and the operation degrades.

use std::{
    fs,
    io::Write,
    path::Path,
};

use log::{debug, error, info, warn};
use tempfile::NamedTempFile;

use crate::{crypto, keys, migrate, Config, Note, Result, StoreError};

/// Manages the loading and saving of the note collection.
pub struct NoteStore {
    config: Config,
}

impl NoteStore {
    /// Creates a store over the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration this store operates on.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Loads the note collection.
    ///
    /// Never fails: an unreadable, undecryptable, or unparseable store
    /// with no recoverable legacy data yields an empty collection.
    pub fn load(&self) -> Vec<Note> {
        if let Err(e) = fs::create_dir_all(&self.config.data_dir) {
            error!(
                "Failed to create data directory {}: {}",
                self.config.data_dir.display(),
                e
            );
            return Vec::new();
        }

        let store_file = self.config.store_file();
        if !store_file.exists() {
            debug!("No store file at {}, trying migration", store_file.display());
            return self.migrate_and_persist();
        }

        let bytes = match fs::read(&store_file) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Failed to read store file {}: {}", store_file.display(), e);
                return Vec::new();
            }
        };

        // Primary path: a healthy encrypted store under the current key.
        match keys::get_or_create_key(&self.config, None) {
            Ok(key) => match decode_encrypted(&bytes, &key) {
                Ok(notes) => {
                    debug!("Loaded {} notes from encrypted store", notes.len());
                    return notes;
                }
                Err(e) => debug!("Store did not open with the current key: {}", e),
            },
            Err(e) => warn!("Encryption key unavailable: {}", e),
        }

        // Legacy path: an unencrypted store from an older version.
        match decode_plaintext(&bytes) {
            Ok(notes) => {
                info!(
                    "Found legacy plaintext store with {} notes, rewriting encrypted",
                    notes.len()
                );
                self.save(&notes);
                return notes;
            }
            Err(e) => debug!("Store is not legacy plaintext either: {}", e),
        }

        warn!(
            "Store file {} is unreadable in any known format, trying migration",
            store_file.display()
        );
        self.migrate_and_persist()
    }

    /// Saves the note collection as one encrypted blob, replacing the
    /// store file whole. I/O errors are logged and swallowed so a
    /// failed save never takes the application down; embedders that
    /// need to surface the failure should watch the log.
    pub fn save(&self, notes: &[Note]) {
        if let Err(e) = self.write_store(notes) {
            error!("Failed to save {} notes: {}", notes.len(), e);
        }
    }

    fn write_store(&self, notes: &[Note]) -> Result<()> {
        fs::create_dir_all(&self.config.data_dir).map_err(|_| StoreError::Directory {
            path: self.config.data_dir.clone(),
        })?;

        let key = keys::get_or_create_key(&self.config, None)?;
        let json = serde_json::to_string_pretty(notes)?;
        let blob = crypto::encrypt(&json, &key)?;

        let store_file = self.config.store_file();
        let dir = store_file.parent().unwrap_or_else(|| Path::new("."));
        let mut temp_file = NamedTempFile::new_in(dir)?;
        temp_file.write_all(&blob)?;
        temp_file.flush()?;
        temp_file
            .persist(&store_file)
            .map_err(|e| StoreError::Io(e.error))?;

        debug!("Saved {} notes to {}", notes.len(), store_file.display());
        Ok(())
    }

    /// Runs the migration resolver and, when it recovered anything,
    /// persists the result in the current format so later loads hit
    /// the canonical store directly.
    fn migrate_and_persist(&self) -> Vec<Note> {
        let notes = migrate::find_and_import(&self.config);
        if notes.is_empty() {
            debug!("Nothing to migrate, starting with an empty collection");
        } else {
            info!("Imported {} notes from a legacy location", notes.len());
            self.save(&notes);
        }
        notes
    }
}

/// Decoder for the current format: encrypted blob wrapping a JSON array.
pub(crate) fn decode_encrypted(bytes: &[u8], key: &[u8]) -> Result<Vec<Note>> {
    let payload = crypto::decrypt(bytes, key)?;
    parse_note_list(payload.as_bytes())
}

/// Decoder for the legacy format: the JSON array with no encryption.
pub(crate) fn decode_plaintext(bytes: &[u8]) -> Result<Vec<Note>> {
    parse_note_list(bytes)
}

fn parse_note_list(bytes: &[u8]) -> Result<Vec<Note>> {
    Ok(serde_json::from_slice::<Vec<Note>>(bytes)?)
}
