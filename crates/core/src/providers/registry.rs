use log::warn;

use crate::errors::CoreError;
use crate::models::recommendation::{Recommendation, RecommendationRequest};
use crate::models::settings::Settings;

use super::heuristic::HeuristicAdvisor;
use super::remote::RemoteAdvisor;
use super::traits::{validate_request, SavingsAdvisor};

/// Settings key holding the bearer token for the remote advisor.
pub const ADVISOR_API_KEY: &str = "advisor";

/// Ordered list of advisors. The first one that answers wins; later ones
/// are fallbacks.
pub struct AdvisorRegistry {
    advisors: Vec<Box<dyn SavingsAdvisor>>,
}

impl AdvisorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            advisors: Vec::new(),
        }
    }

    /// The remote advisor when an endpoint is configured, then the local
    /// heuristic as a fallback that always answers.
    pub fn new_with_defaults(settings: &Settings) -> Self {
        let mut registry = Self::new();

        if let Some(endpoint) = settings.advisor_endpoint.as_deref().filter(|e| !e.trim().is_empty()) {
            let key = settings.api_keys.get(ADVISOR_API_KEY).cloned();
            registry.register(Box::new(RemoteAdvisor::new(endpoint.trim(), key)));
        }

        registry.register(Box::new(HeuristicAdvisor::new()));
        registry
    }

    pub fn register(&mut self, advisor: Box<dyn SavingsAdvisor>) {
        self.advisors.push(advisor);
    }

    /// Names in priority order.
    pub fn names(&self) -> Vec<String> {
        self.advisors.iter().map(|a| a.name().to_string()).collect()
    }

    /// Validate `request` and ask each advisor in turn until one answers.
    /// Returns the last advisor's error if none does.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, CoreError> {
        validate_request(request)?;

        let mut last_error = None;
        for advisor in &self.advisors {
            match advisor.recommend(request).await {
                Ok(recommendation) => return Ok(recommendation),
                Err(e) => {
                    warn!("Advisor {} failed: {e}", advisor.name());
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or(CoreError::NoAdvisor))
    }
}

impl Default for AdvisorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
