use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How far a plan is towards its goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanProgress {
    pub plan_id: Uuid,

    /// Sum of the amounts of tiles marked as saved
    pub saved_from_tiles: f64,

    /// Sum of all extra savings
    pub saved_from_extra: f64,

    /// saved_from_tiles + saved_from_extra
    pub total_saved: f64,

    /// The plan's current goal
    pub goal: f64,

    /// goal - total_saved, never below zero
    pub remaining: f64,

    /// total_saved / goal × 100 (0 when the goal is 0). May exceed 100.
    pub progress_pct: f64,

    /// Number of tiles marked as saved
    pub tiles_saved: usize,

    /// Number of tiles in the plan
    pub tiles_total: usize,

    /// total_saved >= goal
    pub is_complete: bool,
}

/// Result of a write that can move a plan towards its goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub progress: PlanProgress,

    /// True only when this write took the plan from incomplete to complete.
    pub goal_reached: bool,
}

/// Totals across every plan in one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub account_id: Uuid,
    pub account_name: String,

    /// Currency of the first plan, or the settings currency when there are no plans
    pub currency: String,

    pub plan_count: usize,
    pub total_goal: f64,
    pub total_saved: f64,

    /// total_goal - total_saved, never below zero
    pub total_remaining: f64,

    /// total_saved / total_goal × 100 (0 when there is no goal)
    pub overall_progress_pct: f64,

    /// Per-plan breakdown, in the account's plan order
    pub plans: Vec<PlanProgress>,
}
