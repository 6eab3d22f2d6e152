use serde::{Deserialize, Serialize};

/// A suggested daily amount with a short explanation.
///
/// Advisory only: shown to the user before a plan is created and never
/// fed back into tile generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub daily_savings_recommendation: f64,
    pub explanation: String,
}

/// Inputs an advisor works from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub goal_amount: f64,
    pub duration_days: u32,
    pub savings_intensity: u8,
}
