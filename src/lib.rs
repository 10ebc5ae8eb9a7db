//! Note persistence and protection core for the notestack application.
//!
//! This library owns the durable side of the app: the encrypted
//! on-disk note collection, key derivation and management, and the
//! compatibility chain that adopts data written by older versions.
//! The UI layer is a collaborator that calls [`load_notes`] and
//! [`save_notes`] and applies [`validate_content`] before saving.

use log::info;

mod config;
mod crypto;
mod errors;
mod keys;
mod migrate;
mod note;
mod storage;

// Re-export key components
pub use config::*;
pub use crypto::{decrypt, encrypt};
pub use errors::*;
pub use keys::*;
pub use note::*;
pub use storage::*;

/// Loads the note collection from the canonical store for this
/// machine, migrating legacy data when present.
pub fn load_notes() -> Vec<Note> {
    NoteStore::new(Config::resolve()).load()
}

/// Saves the note collection to the canonical store for this machine.
pub fn save_notes(notes: &[Note]) {
    NoteStore::new(Config::resolve()).save(notes)
}

/// Initializes logging for the embedding application.
pub fn initialize_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}
