use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;
use std::sync::Mutex;

use log::info;

use crate::errors::CoreError;
use crate::models::user_data::{StorageKey, UserData};

#[cfg(not(target_arch = "wasm32"))]
use super::encryption::KdfParams;
#[cfg(not(target_arch = "wasm32"))]
use super::manager::StorageManager;

/// Extension of files written by [`FileStore`].
pub const FILE_EXTENSION: &str = "sgrd";

/// Durable home of the per-user data trees.
///
/// Each key maps to one whole tree. `save` replaces the stored tree in one
/// step; there is no partial update.
pub trait UserDataStore: Send + Sync {
    /// The stored tree, or `None` if nothing was saved under `key` yet.
    fn load(&self, key: &StorageKey) -> Result<Option<UserData>, CoreError>;

    fn save(&self, key: &StorageKey, data: &UserData) -> Result<(), CoreError>;

    /// Forget the tree under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &StorageKey) -> Result<(), CoreError>;
}

/// In-process store keeping each tree as a JSON document.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys that currently hold a tree, sorted.
    pub fn keys(&self) -> Vec<StorageKey> {
        let mut keys: Vec<StorageKey> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<StorageKey, String>> {
        // A poisoned map still holds whole documents; keep using it.
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl UserDataStore for MemoryStore {
    fn load(&self, key: &StorageKey) -> Result<Option<UserData>, CoreError> {
        self.lock()
            .get(key)
            .map(|doc| serde_json::from_str(doc))
            .transpose()
            .map_err(CoreError::from)
    }

    fn save(&self, key: &StorageKey, data: &UserData) -> Result<(), CoreError> {
        let doc = serde_json::to_string(data)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize user data: {e}")))?;
        self.lock().insert(key.clone(), doc);
        Ok(())
    }

    fn remove(&self, key: &StorageKey) -> Result<(), CoreError> {
        self.lock().remove(key);
        Ok(())
    }
}

/// Directory of encrypted SGRD files, one per storage key (native only).
///
/// Writes go to a temporary file that is then renamed over the old one, so
/// a crash mid-write leaves the previous tree intact.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileStore {
    dir: PathBuf,
    password: String,
    kdf_params: KdfParams,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Create the directory if needed.
    pub fn new(dir: impl Into<PathBuf>, password: impl Into<String>) -> Result<Self, CoreError> {
        Self::with_params(dir, password, KdfParams::default())
    }

    /// Same as [`new`](Self::new) with explicit Argon2 costs.
    pub fn with_params(
        dir: impl Into<PathBuf>,
        password: impl Into<String>,
        kdf_params: KdfParams,
    ) -> Result<Self, CoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            password: password.into(),
            kdf_params,
        })
    }

    /// File backing `key`. ASCII alphanumerics and `-` are kept; every other
    /// byte, `_` included, is written as `_XX` hex, so distinct keys never
    /// share a file.
    pub fn path_for(&self, key: &StorageKey) -> PathBuf {
        let mut stem = String::with_capacity(key.as_str().len());
        for b in key.as_str().bytes() {
            if b.is_ascii_alphanumeric() || b == b'-' {
                stem.push(char::from(b));
            } else {
                stem.push_str(&format!("_{b:02X}"));
            }
        }
        self.dir.join(format!("{stem}.{FILE_EXTENSION}"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl UserDataStore for FileStore {
    fn load(&self, key: &StorageKey) -> Result<Option<UserData>, CoreError> {
        let path = self.path_for(key);
        match std::fs::read(&path) {
            Ok(bytes) => StorageManager::load_from_bytes(&bytes, &self.password).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &StorageKey, data: &UserData) -> Result<(), CoreError> {
        let bytes = StorageManager::save_to_bytes_with_params(data, &self.password, self.kdf_params)?;
        let path = self.path_for(key);
        let tmp = path.with_extension(format!("{FILE_EXTENSION}.tmp"));
        std::fs::write(&tmp, bytes)?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        info!("Saved {key} to {}", path.display());
        Ok(())
    }

    fn remove(&self, key: &StorageKey) -> Result<(), CoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
