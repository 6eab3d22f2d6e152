use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::recommendation::{Recommendation, RecommendationRequest};
use super::traits::SavingsAdvisor;

/// Extra daily amount per intensity step above 1 (5%, so intensity 10 adds 45%).
pub const INTENSITY_STEP: f64 = 0.05;

/// Local advisor: the flat daily average, raised with intensity so that
/// harder plans finish early.
///
/// - **Offline**: no network, no API key.
/// - **Deterministic**: same inputs, same answer.
pub struct HeuristicAdvisor;

impl HeuristicAdvisor {
    pub fn new() -> Self {
        Self
    }

    /// The arithmetic behind [`SavingsAdvisor::recommend`], without the async wrapper.
    pub fn compute(&self, request: &RecommendationRequest) -> Recommendation {
        let goal = request.goal_amount;
        let days = f64::from(request.duration_days);
        let steps = request.savings_intensity.saturating_sub(1);

        let base = goal / days;
        let factor = 1.0 + f64::from(steps) * INTENSITY_STEP;
        let daily = (base * factor).ceil().max(1.0);
        let finish_day = ((goal / daily).ceil() as u32).min(request.duration_days).max(1);

        let explanation = if steps == 0 {
            format!(
                "Saving {goal} over {} days needs {base:.2} per day; rounded up to {daily}, \
                 the goal is reached on day {finish_day}.",
                request.duration_days
            )
        } else {
            format!(
                "Saving {goal} over {} days needs {base:.2} per day. Intensity {}/10 raises \
                 that by {:.0}% to {daily}, which reaches the goal around day {finish_day}.",
                request.duration_days,
                request.savings_intensity,
                (factor - 1.0) * 100.0
            )
        };

        Recommendation {
            daily_savings_recommendation: daily,
            explanation,
        }
    }
}

impl Default for HeuristicAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl SavingsAdvisor for HeuristicAdvisor {
    fn name(&self) -> &str {
        "Heuristic"
    }

    async fn recommend(&self, request: &RecommendationRequest) -> Result<Recommendation, CoreError> {
        Ok(self.compute(request))
    }
}
