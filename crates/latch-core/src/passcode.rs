//! Local passcode storage with Argon2id hashing
//!
//! The passcode gates access to the application only; it is never sent
//! anywhere. The hash lives in a small JSON record next to the config.

use std::fs;
use std::path::{Path, PathBuf};

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::StoreError;

/// Storage file name
pub const PASSCODE_FILE_NAME: &str = "passcode.json";

/// Current record version
const RECORD_VERSION: u32 = 1;

/// Where passcodes are set and checked
pub trait PasscodeStore {
    /// Whether a passcode is currently set
    fn has_passcode(&self) -> bool;

    /// Replace the passcode; empty bytes clear it
    fn set_passcode(&mut self, passcode: &[u8]) -> Result<(), StoreError>;

    /// Compare against the stored passcode
    fn check_passcode(&self, passcode: &[u8]) -> bool;
}

/// Passcode record format (persisted to disk)
#[derive(Serialize, Deserialize)]
struct PasscodeRecord {
    /// Argon2id PHC string
    hash: String,
    /// Version for future migrations
    version: u32,
}

/// File-backed passcode store
pub struct LocalPasscodeStore {
    /// Path to the record file
    path: PathBuf,
    /// Loaded record, if a passcode is set
    record: Option<PasscodeRecord>,
}

impl LocalPasscodeStore {
    /// Open the store at the default location
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(Self::default_path())
    }

    /// Open the store in `dir`, creating the directory if needed
    pub fn open_in(dir: &Path) -> Result<Self, StoreError> {
        Self::open(dir.join(PASSCODE_FILE_NAME))
    }

    /// Open the store at `path`
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let record = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            Some(serde_json::from_str(&contents).map_err(|e| StoreError::Parse(e.to_string()))?)
        } else {
            None
        };

        Ok(Self { path, record })
    }

    /// Default record path
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("latch")
            .join(PASSCODE_FILE_NAME)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        self.record = None;
        tracing::info!("Local passcode cleared");
        Ok(())
    }

    fn write_record(&self, record: &PasscodeRecord) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(record)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        fs::write(&self.path, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}

impl PasscodeStore for LocalPasscodeStore {
    fn has_passcode(&self) -> bool {
        self.record.is_some()
    }

    fn set_passcode(&mut self, passcode: &[u8]) -> Result<(), StoreError> {
        if passcode.is_empty() {
            return self.clear();
        }

        let salt = SaltString::generate(&mut OsRng);
        let bytes = Zeroizing::new(passcode.to_vec());
        let hash = Argon2::default()
            .hash_password(&bytes, &salt)
            .map_err(|e| StoreError::Hash(e.to_string()))?
            .to_string();

        let record = PasscodeRecord {
            hash,
            version: RECORD_VERSION,
        };
        self.write_record(&record)?;
        self.record = Some(record);

        tracing::info!("Local passcode set");
        Ok(())
    }

    fn check_passcode(&self, passcode: &[u8]) -> bool {
        let Some(record) = &self.record else {
            return false;
        };

        let parsed = match PasswordHash::new(&record.hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!("Stored passcode hash is invalid: {}", e);
                return false;
            }
        };

        let bytes = Zeroizing::new(passcode.to_vec());
        Argon2::default().verify_password(&bytes, &parsed).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_and_check() {
        let temp_dir = tempdir().unwrap();
        let mut store = LocalPasscodeStore::open_in(temp_dir.path()).unwrap();
        assert!(!store.has_passcode());
        assert!(!store.check_passcode(b"secret"));

        store.set_passcode(b"secret").unwrap();
        assert!(store.has_passcode());
        assert!(store.check_passcode(b"secret"));
        assert!(!store.check_passcode(b"Secret"));
        assert!(!store.check_passcode(b""));
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = tempdir().unwrap();
        {
            let mut store = LocalPasscodeStore::open_in(temp_dir.path()).unwrap();
            store.set_passcode("пароль".as_bytes()).unwrap();
        }

        let store = LocalPasscodeStore::open_in(temp_dir.path()).unwrap();
        assert!(store.has_passcode());
        assert!(store.check_passcode("пароль".as_bytes()));
    }

    #[test]
    fn test_empty_passcode_clears() {
        let temp_dir = tempdir().unwrap();
        let mut store = LocalPasscodeStore::open_in(temp_dir.path()).unwrap();
        store.set_passcode(b"1234").unwrap();
        assert!(store.path().exists());

        store.set_passcode(b"").unwrap();
        assert!(!store.has_passcode());
        assert!(!store.path().exists());
        assert!(!store.check_passcode(b"1234"));
    }

    #[test]
    fn test_record_does_not_contain_plaintext() {
        let temp_dir = tempdir().unwrap();
        let mut store = LocalPasscodeStore::open_in(temp_dir.path()).unwrap();
        store.set_passcode(b"hunter22").unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert!(!contents.contains("hunter22"));
        assert!(contents.contains("$argon2id$"));
    }

    #[test]
    fn test_corrupt_record_is_an_error() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join(PASSCODE_FILE_NAME), "not json").unwrap();
        assert!(matches!(
            LocalPasscodeStore::open_in(temp_dir.path()),
            Err(StoreError::Parse(_))
        ));
    }
}
