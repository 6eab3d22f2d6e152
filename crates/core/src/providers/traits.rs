use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::denomination::Intensity;
use crate::models::recommendation::{Recommendation, RecommendationRequest};

/// Something that can suggest a daily savings amount for a prospective plan.
///
/// Implemented locally ([`HeuristicAdvisor`](super::heuristic::HeuristicAdvisor))
/// and over HTTP ([`RemoteAdvisor`](super::remote::RemoteAdvisor)). Advisors are
/// consulted before a plan is created and have no say in how its tiles are generated.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait SavingsAdvisor: Send + Sync {
    /// Human-readable name of this advisor (for logs/errors).
    fn name(&self) -> &str;

    /// Suggest a daily amount. `request` has already passed [`validate_request`].
    async fn recommend(&self, request: &RecommendationRequest) -> Result<Recommendation, CoreError>;
}

/// Reject requests no advisor can answer: a zero or non-finite goal, zero
/// days, or an intensity outside 1..=10.
pub fn validate_request(request: &RecommendationRequest) -> Result<(), CoreError> {
    if !request.goal_amount.is_finite() || request.goal_amount <= 0.0 {
        return Err(CoreError::ValidationError(
            "Goal amount must be positive to get a recommendation".into(),
        ));
    }
    if request.duration_days == 0 {
        return Err(CoreError::ValidationError(
            "Duration must be at least one day to get a recommendation".into(),
        ));
    }
    Intensity::new(request.savings_intensity)?;
    Ok(())
}
