use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::denomination::Intensity;
use crate::models::plan::{ExtraSaving, NewExtraSaving, NewPlan, Plan, PlanUpdate};
use crate::models::progress::ProgressUpdate;
use crate::models::tile::Tile;
use crate::models::user_data::UserData;
use crate::services::progress_service::ProgressService;
use crate::services::tile_service::TileService;
use crate::services::tree;

/// Longest plan that can be created, in days (10 years).
pub const MAX_DURATION_DAYS: u32 = 3650;

/// Largest goal accepted. Tile arithmetic stays exact in `f64` below this.
pub const MAX_GOAL: f64 = 1e12;

/// Manages plans inside accounts: creation (with tile generation), edits,
/// deletion, marking tiles and logging extra savings.
///
/// Every operation validates its input first and returns a new tree, so a
/// rejected write never leaves a partial plan behind.
pub struct PlanService {
    tile_service: TileService,
    progress_service: ProgressService,
}

impl PlanService {
    pub fn new() -> Self {
        Self {
            tile_service: TileService::new(),
            progress_service: ProgressService::new(),
        }
    }

    /// Validate `new_plan`, generate its tiles and append it to the account.
    ///
    /// The plan is stamped with the current time and the currency from settings.
    pub fn create_plan(
        &self,
        data: &UserData,
        account_id: Uuid,
        new_plan: NewPlan,
    ) -> Result<(UserData, Plan), CoreError> {
        let name = Self::validate_name(&new_plan.name)?;
        Self::validate_goal(new_plan.goal)?;
        Self::validate_duration(new_plan.duration)?;
        let intensity = Intensity::new(new_plan.intensity)?;

        if data.account(account_id).is_none() {
            return Err(CoreError::AccountNotFound(account_id.to_string()));
        }

        let tiles: Vec<Tile> = self
            .tile_service
            .generate_for(new_plan.goal, new_plan.duration, intensity)
            .into_iter()
            .map(Tile::from_draft)
            .collect();

        let plan = Plan {
            id: Uuid::new_v4(),
            name,
            goal: new_plan.goal,
            duration: new_plan.duration,
            intensity,
            start_date: Utc::now(),
            tiles,
            extra_savings: Vec::new(),
            currency: data.settings.currency.clone(),
        };

        let inserted = plan.clone();
        let next = tree::with_account(data, account_id, |account| {
            account.plans.push(inserted);
            Ok(())
        })?;

        info!(
            "Created plan {} ({} days, goal {}, intensity {}) in account {account_id}",
            plan.id, plan.duration, plan.goal, plan.intensity
        );
        Ok((next, plan))
    }

    /// Change a plan's name and/or goal. Duration and intensity are fixed
    /// once a plan exists, and the tiles are kept as they are.
    pub fn update_plan(
        &self,
        data: &UserData,
        account_id: Uuid,
        plan_id: Uuid,
        update: PlanUpdate,
    ) -> Result<UserData, CoreError> {
        let name = update.name.as_deref().map(Self::validate_name).transpose()?;
        if let Some(goal) = update.goal {
            Self::validate_goal(goal)?;
        }

        tree::with_plan(data, account_id, plan_id, |plan| {
            if let Some(name) = name {
                plan.name = name;
            }
            if let Some(goal) = update.goal {
                plan.goal = goal;
            }
            Ok(())
        })
    }

    pub fn delete_plan(
        &self,
        data: &UserData,
        account_id: Uuid,
        plan_id: Uuid,
    ) -> Result<UserData, CoreError> {
        let next = tree::with_account(data, account_id, |account| {
            let idx = account
                .plans
                .iter()
                .position(|p| p.id == plan_id)
                .ok_or_else(|| CoreError::PlanNotFound(plan_id.to_string()))?;
            account.plans.remove(idx);
            Ok(())
        })?;

        info!("Deleted plan {plan_id} from account {account_id}");
        Ok(next)
    }

    /// Mark a tile as saved (stamping today's date) or unsaved (clearing it).
    ///
    /// Marking an already-saved tile again keeps its original date.
    pub fn set_tile_saved(
        &self,
        data: &UserData,
        account_id: Uuid,
        plan_id: Uuid,
        tile_id: Uuid,
        saved: bool,
    ) -> Result<(UserData, ProgressUpdate), CoreError> {
        let next = tree::with_tile(data, account_id, plan_id, tile_id, |tile| {
            if saved {
                if !tile.saved {
                    tile.saved = true;
                    tile.saved_date = Some(Utc::now());
                }
            } else {
                tile.saved = false;
                tile.saved_date = None;
            }
            Ok(())
        })?;

        let update = self.progress_between(data, &next, account_id, plan_id)?;
        Ok((next, update))
    }

    /// Log a contribution outside the tile schedule, dated now.
    pub fn add_extra_saving(
        &self,
        data: &UserData,
        account_id: Uuid,
        plan_id: Uuid,
        saving: NewExtraSaving,
    ) -> Result<(UserData, ProgressUpdate), CoreError> {
        if !saving.amount.is_finite() || saving.amount <= 0.0 {
            return Err(CoreError::ValidationError(
                "Extra saving amount must be positive".into(),
            ));
        }

        let extra = ExtraSaving {
            id: Uuid::new_v4(),
            amount: saving.amount,
            date: Utc::now(),
            description: saving.description.trim().to_string(),
        };

        let next = tree::with_plan(data, account_id, plan_id, |plan| {
            plan.extra_savings.push(extra);
            Ok(())
        })?;

        let update = self.progress_between(data, &next, account_id, plan_id)?;
        Ok((next, update))
    }

    fn progress_between(
        &self,
        before: &UserData,
        after: &UserData,
        account_id: Uuid,
        plan_id: Uuid,
    ) -> Result<ProgressUpdate, CoreError> {
        let old = tree::find_plan(before, account_id, plan_id)?;
        let new = tree::find_plan(after, account_id, plan_id)?;
        let update = self.progress_service.progress_update(old, new);
        if update.goal_reached {
            info!("Plan {plan_id} reached its goal of {}", new.goal);
        }
        Ok(update)
    }

    // ── Validation ──────────────────────────────────────────────────

    fn validate_name(name: &str) -> Result<String, CoreError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CoreError::ValidationError("Plan name must not be empty".into()));
        }
        Ok(trimmed.to_string())
    }

    fn validate_goal(goal: f64) -> Result<(), CoreError> {
        if !goal.is_finite() || goal <= 0.0 {
            return Err(CoreError::ValidationError("Goal must be a positive amount".into()));
        }
        if goal.fract() != 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Goal must be a whole number of currency units, got {goal}"
            )));
        }
        if goal > MAX_GOAL {
            return Err(CoreError::ValidationError(format!(
                "Goal of {goal} exceeds maximum of {MAX_GOAL}"
            )));
        }
        Ok(())
    }

    fn validate_duration(duration: u32) -> Result<(), CoreError> {
        if duration == 0 {
            return Err(CoreError::ValidationError("Duration must be at least one day".into()));
        }
        if duration > MAX_DURATION_DAYS {
            return Err(CoreError::ValidationError(format!(
                "Duration of {duration} days exceeds maximum of {MAX_DURATION_DAYS} days (10 years)"
            )));
        }
        Ok(())
    }
}

impl Default for PlanService {
    fn default() -> Self {
        Self::new()
    }
}
