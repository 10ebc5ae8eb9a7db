//! Storage path configuration.
//!
//! All paths the core touches are resolved once into a [`Config`] and
//! passed by reference to the key manager and the store, so tests can
//! point everything at a temporary directory.

use std::path::{Path, PathBuf};

/// Application name, used as the data directory name.
pub const APP_NAME: &str = "notestack";

/// File name of the encrypted note collection inside the data directory.
pub const STORE_FILE_NAME: &str = "notes.json";

/// File name of the symmetric key inside the data directory.
pub const KEY_FILE_NAME: &str = ".key";

/// Data directory older versions created relative to the launch directory.
pub const LEGACY_DATA_DIR: &str = "data";

/// Resolved storage paths for one application instance.
#[derive(Debug, Clone)]
pub struct Config {
    /// Canonical directory holding the store file and the key file.
    pub data_dir: PathBuf,

    /// Candidate directories where an older version may have left note
    /// data, in the order migration should try them.
    pub legacy_dirs: Vec<PathBuf>,
}

impl Config {
    /// Resolves the canonical data directory and the platform's legacy
    /// candidates for this machine.
    pub fn resolve() -> Self {
        let data_dir = canonical_data_dir();
        let legacy_dirs = legacy_candidates(&data_dir);
        Self {
            data_dir,
            legacy_dirs,
        }
    }

    /// Builds a configuration rooted at an explicit directory, with no
    /// legacy candidates. Intended for tests and embedders that manage
    /// their own paths.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            legacy_dirs: Vec::new(),
        }
    }

    /// Path of the note collection file.
    pub fn store_file(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }

    /// Path of the key file.
    pub fn key_file(&self) -> PathBuf {
        self.data_dir.join(KEY_FILE_NAME)
    }
}

/// Computes the per-OS application data directory for the store.
fn canonical_data_dir() -> PathBuf {
    #[cfg(windows)]
    {
        // %APPDATA% can be virtualized to a sandbox-private directory,
        // stranding the store there. The real profile path wins.
        if let Some(home) = dirs::home_dir() {
            return home.join("AppData").join("Roaming").join(APP_NAME);
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from(LEGACY_DATA_DIR))
}

/// Legacy locations older versions may have written to, highest
/// priority first.
fn legacy_candidates(canonical: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(redirected) = redirected_appdata_dir() {
        if redirected.as_path() != canonical {
            candidates.push(redirected);
        }
    }

    candidates.push(PathBuf::from(LEGACY_DATA_DIR));
    candidates
}

#[cfg(windows)]
fn redirected_appdata_dir() -> Option<PathBuf> {
    std::env::var_os("APPDATA").map(|appdata| PathBuf::from(appdata).join(APP_NAME))
}

#[cfg(not(windows))]
fn redirected_appdata_dir() -> Option<PathBuf> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_and_key_files_live_in_the_data_dir() {
        let config = Config::with_data_dir("/tmp/ns-test");
        assert_eq!(config.store_file(), PathBuf::from("/tmp/ns-test/notes.json"));
        assert_eq!(config.key_file(), PathBuf::from("/tmp/ns-test/.key"));
    }

    #[test]
    fn explicit_data_dir_has_no_legacy_candidates() {
        let config = Config::with_data_dir("/tmp/ns-test");
        assert!(config.legacy_dirs.is_empty());
    }

    #[test]
    fn resolved_config_always_considers_the_relative_data_dir() {
        let config = Config::resolve();
        assert_eq!(
            config.legacy_dirs.last(),
            Some(&PathBuf::from(LEGACY_DATA_DIR))
        );
    }
}
