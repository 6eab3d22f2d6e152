use crate::models::plan::Plan;
use crate::models::progress::{PlanProgress, ProgressUpdate};

/// Computes how far a plan is towards its goal.
///
/// Saved tiles and extra savings both count. The goal used is the plan's
/// current goal, which may have been edited after the tiles were generated.
pub struct ProgressService;

impl ProgressService {
    pub fn new() -> Self {
        Self
    }

    pub fn plan_progress(&self, plan: &Plan) -> PlanProgress {
        let (saved_from_tiles, tiles_saved) = plan
            .tiles
            .iter()
            .filter(|t| t.saved)
            .fold((0.0, 0), |(sum, count), t| (sum + t.amount, count + 1));
        let saved_from_extra: f64 = plan.extra_savings.iter().map(|s| s.amount).sum();
        let total_saved = saved_from_tiles + saved_from_extra;

        PlanProgress {
            plan_id: plan.id,
            saved_from_tiles,
            saved_from_extra,
            total_saved,
            goal: plan.goal,
            remaining: (plan.goal - total_saved).max(0.0),
            progress_pct: if plan.goal > 0.0 {
                total_saved / plan.goal * 100.0
            } else {
                0.0
            },
            tiles_saved,
            tiles_total: plan.tiles.len(),
            is_complete: total_saved >= plan.goal,
        }
    }

    /// Compare a plan before and after a write.
    pub fn progress_update(&self, before: &Plan, after: &Plan) -> ProgressUpdate {
        let was_complete = self.plan_progress(before).is_complete;
        let progress = self.plan_progress(after);
        ProgressUpdate {
            goal_reached: !was_complete && progress.is_complete,
            progress,
        }
    }
}

impl Default for ProgressService {
    fn default() -> Self {
        Self::new()
    }
}
