//! API key storage: load and persist the user-supplied key in the config directory.
//!
//! The key is stored in a dedicated file with restrictive permissions (0o600 on Unix).
//! It is never validated or sent anywhere; absence of the file is a valid "no key" state.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::core::paths;

/// Errors when loading or storing the API key.
#[derive(Debug, thiserror::Error)]
pub enum KeyStoreError {
    #[error("No config directory available")]
    NoConfigDir,
    #[error("API key is empty")]
    EmptyKey,
    #[error("Failed to store API key: {0}")]
    Io(#[from] io::Error),
}

/// In-memory credential plus its backing file. The file is read once at
/// construction; save/clear write through synchronously.
#[derive(Debug)]
pub struct KeyStore {
    key: Option<String>,
    path: PathBuf,
}

impl KeyStore {
    /// Open the store at the default location (`<config_dir>/api-key`).
    pub fn open() -> Result<Self, KeyStoreError> {
        let path = paths::config_dir()
            .ok_or(KeyStoreError::NoConfigDir)?
            .join("api-key");
        Ok(Self::at(path))
    }

    /// Open the store backed by an explicit file (tests use a temp path).
    /// An absent, empty, or unreadable file yields no credential.
    pub fn at(path: PathBuf) -> Self {
        let key = fs::read_to_string(&path)
            .ok()
            .map(|c| c.trim().to_string())
            .filter(|k| !k.is_empty());
        Self { key, path }
    }

    /// The current credential, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Set the in-memory key without persisting (env var override).
    pub fn set_transient(&mut self, key: String) {
        let trimmed = key.trim().to_string();
        if !trimmed.is_empty() {
            self.key = Some(trimmed);
        }
    }

    /// Store the trimmed key in memory and on disk. On Unix, sets file
    /// permissions to 0o600. An empty or whitespace-only key is rejected.
    pub fn save(&mut self, key: &str) -> Result<(), KeyStoreError> {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(KeyStoreError::EmptyKey);
        }
        let dir = self.path.parent().ok_or_else(|| {
            KeyStoreError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Invalid credentials path",
            ))
        })?;
        fs::create_dir_all(dir)?;

        let mut file = fs::File::create(&self.path)?;
        file.write_all(trimmed.as_bytes())?;
        file.write_all(b"\n")?;

        #[cfg(unix)]
        {
            let mut perms = file.metadata()?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)?;
        }

        self.key = Some(trimmed.to_string());
        Ok(())
    }

    /// Remove the credential from memory and disk.
    pub fn clear(&mut self) -> Result<(), KeyStoreError> {
        self.key = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyStore, KeyStoreError};

    #[test]
    fn roundtrip_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api-key");

        let mut store = KeyStore::at(path.clone());
        assert_eq!(store.key(), None);

        store.save("sk-test-key-123").unwrap();
        assert_eq!(store.key(), Some("sk-test-key-123"));

        // A fresh store sees the persisted key.
        let reloaded = KeyStore::at(path);
        assert_eq!(reloaded.key(), Some("sk-test-key-123"));
    }

    #[test]
    fn save_trims_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api-key");

        let mut store = KeyStore::at(path.clone());
        store.save("  sk-padded \n").unwrap();
        assert_eq!(store.key(), Some("sk-padded"));
        assert_eq!(KeyStore::at(path).key(), Some("sk-padded"));
    }

    #[test]
    fn save_empty_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api-key");

        let mut store = KeyStore::at(path.clone());
        store.save("sk-before").unwrap();
        let err = store.save("   ").unwrap_err();
        assert!(matches!(err, KeyStoreError::EmptyKey));
        // Existing credential untouched, in memory and on disk.
        assert_eq!(store.key(), Some("sk-before"));
        assert_eq!(KeyStore::at(path).key(), Some("sk-before"));
    }

    #[test]
    fn clear_removes_file_and_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api-key");

        let mut store = KeyStore::at(path.clone());
        store.save("sk-gone").unwrap();
        store.clear().unwrap();
        assert_eq!(store.key(), None);
        assert!(!path.exists());
        assert_eq!(KeyStore::at(path).key(), None);
    }

    #[test]
    fn clear_without_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = KeyStore::at(dir.path().join("api-key"));
        store.clear().unwrap();
        assert_eq!(store.key(), None);
    }

    #[test]
    fn transient_key_is_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api-key");

        let mut store = KeyStore::at(path.clone());
        store.set_transient("sk-env".to_string());
        assert_eq!(store.key(), Some("sk-env"));
        assert_eq!(KeyStore::at(path).key(), None);
    }
}
