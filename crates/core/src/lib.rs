pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use models::{
    account::Account,
    chart::{CumulativePoint, MonthlySavings, SavingEntry},
    plan::{NewExtraSaving, NewPlan, Plan, PlanUpdate},
    progress::{DashboardSummary, PlanProgress, ProgressUpdate},
    recommendation::{Recommendation, RecommendationRequest},
    settings::Settings,
    user_data::{StorageKey, UserData},
};
use providers::registry::AdvisorRegistry;
use services::{
    account_service::AccountService, analytics_service::AnalyticsService,
    plan_service::PlanService, progress_service::ProgressService, tree,
};
use storage::store::UserDataStore;
use uuid::Uuid;

use errors::CoreError;
use log::info;

/// Main entry point for the Savings Grid core library.
/// Holds one user's data tree and all services needed to operate on it.
///
/// Writes never edit the tree in place: each one builds a new tree and swaps
/// it in only on success, so a rejected write leaves the state untouched.
#[must_use]
pub struct SavingsGrid {
    key: StorageKey,
    data: UserData,
    account_service: AccountService,
    plan_service: PlanService,
    progress_service: ProgressService,
    analytics_service: AnalyticsService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for SavingsGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SavingsGrid")
            .field("key", &self.key)
            .field("accounts", &self.data.accounts.len())
            .field("active_account_id", &self.data.active_account_id)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl SavingsGrid {
    /// Start with an empty tree for `user_id` (or the guest key).
    pub fn create_new(user_id: Option<&str>) -> Self {
        Self::build(StorageKey::for_user(user_id), UserData::default())
    }

    /// Load the tree stored for `user_id`. A user with nothing stored yet
    /// gets an empty tree.
    pub fn open(store: &dyn UserDataStore, user_id: Option<&str>) -> Result<Self, CoreError> {
        let key = StorageKey::for_user(user_id);
        let data = store.load(&key)?.unwrap_or_default();
        info!("Opened {key} with {} account(s)", data.accounts.len());
        Ok(Self::build(key, data))
    }

    /// Write the whole tree to `store` under this user's key.
    /// Clears the unsaved-changes flag on success.
    pub fn save(&mut self, store: &dyn UserDataStore) -> Result<(), CoreError> {
        store.save(&self.key, &self.data)?;
        self.dirty = false;
        Ok(())
    }

    /// Load a tree from encrypted bytes (password required).
    /// Use this where the frontend handles file I/O.
    pub fn load_from_bytes(
        user_id: Option<&str>,
        encrypted: &[u8],
        password: &str,
    ) -> Result<Self, CoreError> {
        let data = storage::manager::StorageManager::load_from_bytes(encrypted, password)?;
        Ok(Self::build(StorageKey::for_user(user_id), data))
    }

    /// Export the tree as encrypted bytes.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_bytes(&mut self, password: &str) -> Result<Vec<u8>, CoreError> {
        let bytes = storage::manager::StorageManager::save_to_bytes(&self.data, password)?;
        self.dirty = false;
        Ok(bytes)
    }

    // ── Accounts ────────────────────────────────────────────────────

    /// Create an account. The first account created becomes active.
    pub fn add_account(&mut self, name: &str) -> Result<Uuid, CoreError> {
        let (next, id) = self.account_service.add_account(&self.data, name)?;
        self.commit(next);
        Ok(id)
    }

    pub fn switch_account(&mut self, account_id: Uuid) -> Result<(), CoreError> {
        let next = self.account_service.switch_account(&self.data, account_id)?;
        self.commit(next);
        Ok(())
    }

    pub fn rename_account(&mut self, account_id: Uuid, name: &str) -> Result<(), CoreError> {
        let next = self
            .account_service
            .rename_account(&self.data, account_id, name)?;
        self.commit(next);
        Ok(())
    }

    /// Delete an account with all its plans.
    pub fn delete_account(&mut self, account_id: Uuid) -> Result<(), CoreError> {
        let next = self.account_service.delete_account(&self.data, account_id)?;
        self.commit(next);
        Ok(())
    }

    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.data.accounts
    }

    #[must_use]
    pub fn account(&self, account_id: Uuid) -> Option<&Account> {
        self.data.account(account_id)
    }

    #[must_use]
    pub fn active_account(&self) -> Option<&Account> {
        self.data.active_account()
    }

    // ── Plans ───────────────────────────────────────────────────────

    /// Validate, generate tiles for and store a new plan. Returns its id.
    pub fn create_plan(&mut self, account_id: Uuid, new_plan: NewPlan) -> Result<Uuid, CoreError> {
        let (next, plan) = self
            .plan_service
            .create_plan(&self.data, account_id, new_plan)?;
        self.commit(next);
        Ok(plan.id)
    }

    /// Rename a plan and/or change its goal.
    pub fn update_plan(
        &mut self,
        account_id: Uuid,
        plan_id: Uuid,
        update: PlanUpdate,
    ) -> Result<(), CoreError> {
        let next = self
            .plan_service
            .update_plan(&self.data, account_id, plan_id, update)?;
        self.commit(next);
        Ok(())
    }

    pub fn delete_plan(&mut self, account_id: Uuid, plan_id: Uuid) -> Result<(), CoreError> {
        let next = self
            .plan_service
            .delete_plan(&self.data, account_id, plan_id)?;
        self.commit(next);
        Ok(())
    }

    pub fn plan(&self, account_id: Uuid, plan_id: Uuid) -> Result<&Plan, CoreError> {
        tree::find_plan(&self.data, account_id, plan_id)
    }

    /// Mark a tile as saved or unsaved. `goal_reached` in the result tells
    /// whether this call completed the plan.
    pub fn set_tile_saved(
        &mut self,
        account_id: Uuid,
        plan_id: Uuid,
        tile_id: Uuid,
        saved: bool,
    ) -> Result<ProgressUpdate, CoreError> {
        let (next, update) = self
            .plan_service
            .set_tile_saved(&self.data, account_id, plan_id, tile_id, saved)?;
        self.commit(next);
        Ok(update)
    }

    /// Log an extra saving against a plan.
    pub fn add_extra_saving(
        &mut self,
        account_id: Uuid,
        plan_id: Uuid,
        saving: NewExtraSaving,
    ) -> Result<ProgressUpdate, CoreError> {
        let (next, update) = self
            .plan_service
            .add_extra_saving(&self.data, account_id, plan_id, saving)?;
        self.commit(next);
        Ok(update)
    }

    // ── Progress & Analytics ────────────────────────────────────────

    pub fn plan_progress(&self, account_id: Uuid, plan_id: Uuid) -> Result<PlanProgress, CoreError> {
        let plan = tree::find_plan(&self.data, account_id, plan_id)?;
        Ok(self.progress_service.plan_progress(plan))
    }

    pub fn dashboard_summary(&self, account_id: Uuid) -> Result<DashboardSummary, CoreError> {
        let account = self.require_account(account_id)?;
        Ok(self
            .analytics_service
            .dashboard_summary(account, &self.data.settings.currency))
    }

    /// Every dated contribution in one account, oldest first.
    pub fn savings_history(&self, account_id: Uuid) -> Result<Vec<SavingEntry>, CoreError> {
        let account = self.require_account(account_id)?;
        Ok(self.analytics_service.savings_history(&account.plans))
    }

    /// Per-month savings of one account (last 12 months with data).
    pub fn monthly_savings(&self, account_id: Uuid) -> Result<Vec<MonthlySavings>, CoreError> {
        let account = self.require_account(account_id)?;
        Ok(self.analytics_service.monthly_savings(&account.plans))
    }

    /// Running savings total of one account.
    pub fn cumulative_savings(&self, account_id: Uuid) -> Result<Vec<CumulativePoint>, CoreError> {
        let account = self.require_account(account_id)?;
        Ok(self.analytics_service.cumulative_savings(&account.plans))
    }

    // ── Advice ──────────────────────────────────────────────────────

    /// Ask the configured advisors for a daily amount. Advisory only: the
    /// answer has no effect on how plans are generated.
    pub async fn recommend(
        &self,
        goal_amount: f64,
        duration_days: u32,
        savings_intensity: u8,
    ) -> Result<Recommendation, CoreError> {
        let registry = AdvisorRegistry::new_with_defaults(&self.data.settings);
        registry
            .recommend(&RecommendationRequest {
                goal_amount,
                duration_days,
                savings_intensity,
            })
            .await
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.data.settings
    }

    /// Set the currency stamped on plans created from now on.
    pub fn set_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let code = currency.trim().to_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Currency must be a 3-letter code, got '{currency}'"
            )));
        }
        let next = tree::with_tree(&self.data, |data| {
            data.settings.currency = code;
            Ok(())
        })?;
        self.commit(next);
        Ok(())
    }

    /// Point the remote advisor at `endpoint`, or back to local-only with `None`.
    pub fn set_advisor_endpoint(&mut self, endpoint: Option<String>) -> Result<(), CoreError> {
        let next = tree::with_tree(&self.data, |data| {
            data.settings.advisor_endpoint = endpoint.filter(|e| !e.trim().is_empty());
            Ok(())
        })?;
        self.commit(next);
        Ok(())
    }

    /// Store or clear an API key for a remote service.
    pub fn set_api_key(&mut self, service: &str, key: Option<String>) -> Result<(), CoreError> {
        let next = tree::with_tree(&self.data, |data| {
            match key {
                Some(k) => {
                    data.settings.api_keys.insert(service.to_string(), k);
                }
                None => {
                    data.settings.api_keys.remove(service);
                }
            }
            Ok(())
        })?;
        self.commit(next);
        Ok(())
    }

    // ── State ───────────────────────────────────────────────────────

    #[must_use]
    pub fn storage_key(&self) -> &StorageKey {
        &self.key
    }

    /// Read-only access to the whole tree.
    #[must_use]
    pub fn data(&self) -> &UserData {
        &self.data
    }

    /// Whether there are changes not yet saved.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Private ─────────────────────────────────────────────────────

    fn build(key: StorageKey, data: UserData) -> Self {
        Self {
            key,
            data,
            account_service: AccountService::new(),
            plan_service: PlanService::new(),
            progress_service: ProgressService::new(),
            analytics_service: AnalyticsService::new(),
            dirty: false,
        }
    }

    fn commit(&mut self, next: UserData) {
        self.data = next;
        self.dirty = true;
    }

    fn require_account(&self, account_id: Uuid) -> Result<&Account, CoreError> {
        self.data
            .account(account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))
    }
}
