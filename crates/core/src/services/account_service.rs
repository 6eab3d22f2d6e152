use log::info;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::account::Account;
use crate::models::user_data::UserData;
use crate::services::tree;

/// Creates, renames, switches and deletes accounts.
///
/// Pure business logic over the data tree. Every operation returns a new tree.
pub struct AccountService;

impl AccountService {
    pub fn new() -> Self {
        Self
    }

    /// Append a new account. It becomes the active one if none is active yet.
    pub fn add_account(&self, data: &UserData, name: &str) -> Result<(UserData, Uuid), CoreError> {
        let name = Self::validate_name(name)?;
        let account = Account::new(name);
        let id = account.id;

        let next = tree::with_tree(data, |data| {
            data.accounts.push(account);
            if data.active_account_id.is_none() {
                data.active_account_id = Some(id);
            }
            Ok(())
        })?;

        info!("Added account {id}");
        Ok((next, id))
    }

    pub fn switch_account(&self, data: &UserData, account_id: Uuid) -> Result<UserData, CoreError> {
        if data.account(account_id).is_none() {
            return Err(CoreError::AccountNotFound(account_id.to_string()));
        }
        tree::with_tree(data, |data| {
            data.active_account_id = Some(account_id);
            Ok(())
        })
    }

    pub fn rename_account(
        &self,
        data: &UserData,
        account_id: Uuid,
        name: &str,
    ) -> Result<UserData, CoreError> {
        let name = Self::validate_name(name)?;
        tree::with_account(data, account_id, |account| {
            account.name = name;
            Ok(())
        })
    }

    /// Remove an account and all of its plans.
    /// If it was active, the first remaining account takes over (or none).
    pub fn delete_account(&self, data: &UserData, account_id: Uuid) -> Result<UserData, CoreError> {
        let next = tree::with_tree(data, |data| {
            let idx = data
                .accounts
                .iter()
                .position(|a| a.id == account_id)
                .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;
            data.accounts.remove(idx);

            if data.active_account_id == Some(account_id) {
                data.active_account_id = data.accounts.first().map(|a| a.id);
            }
            Ok(())
        })?;

        info!("Deleted account {account_id}");
        Ok(next)
    }

    fn validate_name(name: &str) -> Result<String, CoreError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CoreError::ValidationError("Account name must not be empty".into()));
        }
        Ok(trimmed.to_string())
    }
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new()
    }
}
