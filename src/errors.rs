//! Error types for the notestack persistence core.
//!
//! Internal operations return `Result<T>`; the `NoteStore` public
//! boundary is where the never-crash policy (log and degrade) is
//! applied, so callers above it never see these errors directly.

use std::{io, path::PathBuf};

use thiserror::Error;

/// A specialized Result type for notestack operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// The main error type for the notestack persistence core.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Structurally invalid payload after decryption or plaintext read.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Authentication or format failure while decrypting the store.
    /// Recovered locally by the compatibility chain, never surfaced.
    #[error("Decryption failed: {message}")]
    Decryption { message: String },

    /// Failure while sealing the store payload.
    #[error("Encryption failed: {message}")]
    Encryption { message: String },

    /// Key file unreadable, unwritable, or not a valid key.
    #[error("Key access failed: {message}")]
    KeyAccess { message: String },

    /// Data directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    Directory { path: PathBuf },
}
