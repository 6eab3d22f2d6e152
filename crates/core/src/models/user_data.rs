use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::Account;
use super::settings::Settings;

/// Prefix shared by every storage key.
pub const STORAGE_KEY_PREFIX: &str = "budget-grid:data";

/// The whole per-user data tree. Stored and replaced as one document:
/// every write produces a new tree that overwrites the previous one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    /// All accounts, in creation order
    #[serde(default)]
    pub accounts: Vec<Account>,

    /// Account the user is currently working in
    #[serde(default)]
    pub active_account_id: Option<Uuid>,

    /// Preferences (currency, advisor endpoint, API keys)
    #[serde(default)]
    pub settings: Settings,
}

impl UserData {
    pub fn account(&self, account_id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == account_id)
    }

    pub fn active_account(&self) -> Option<&Account> {
        self.active_account_id.and_then(|id| self.account(id))
    }
}

/// Key under which a user's tree is stored: one per signed-in user,
/// plus a shared guest key for anonymous use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn for_user(user_id: Option<&str>) -> Self {
        match user_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Self(format!("{STORAGE_KEY_PREFIX}:{id}")),
            None => Self::guest(),
        }
    }

    pub fn guest() -> Self {
        Self(format!("{STORAGE_KEY_PREFIX}:guest"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
