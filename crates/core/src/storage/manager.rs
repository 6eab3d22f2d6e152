use crate::errors::CoreError;
use crate::models::user_data::UserData;

use super::encryption::{self, KdfParams};
use super::format;

/// Converts a user data tree to and from encrypted, portable bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// Flow: UserData → bincode → AES-256-GCM(Argon2id(password)) → SGRD container
    pub fn save_to_bytes(data: &UserData, password: &str) -> Result<Vec<u8>, CoreError> {
        Self::save_to_bytes_with_params(data, password, KdfParams::default())
    }

    /// Same as [`save_to_bytes`](Self::save_to_bytes) with explicit Argon2 costs.
    pub fn save_to_bytes_with_params(
        data: &UserData,
        password: &str,
        kdf_params: KdfParams,
    ) -> Result<Vec<u8>, CoreError> {
        let plaintext = bincode::serialize(data)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize user data: {e}")))?;
        let payload = encryption::seal(&plaintext, password, kdf_params)?;
        Ok(format::write_container(&payload))
    }

    /// Flow: SGRD container → Argon2id(password, salt) → AES-256-GCM decrypt → bincode → UserData
    pub fn load_from_bytes(bytes: &[u8], password: &str) -> Result<UserData, CoreError> {
        let payload = format::read_container(bytes)?;
        let plaintext = encryption::open(&payload, password)?;
        bincode::deserialize(&plaintext)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize user data: {e}")))
    }

    /// Save to an encrypted file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(data: &UserData, path: &str, password: &str) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(data, password)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load from an encrypted file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str) -> Result<UserData, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes, password)
    }
}
