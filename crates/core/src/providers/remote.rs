use async_trait::async_trait;
use reqwest::Client;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::recommendation::{Recommendation, RecommendationRequest};
use super::traits::SavingsAdvisor;

const PROVIDER: &str = "RemoteAdvisor";

/// Advisor backed by an HTTP service.
///
/// - **Request**: `POST <endpoint>` with JSON
///   `{"goalAmount", "durationDays", "savingsIntensity"}`.
/// - **Response**: JSON `{"dailySavingsRecommendation", "explanation"}`.
/// - **Auth**: optional bearer token.
pub struct RemoteAdvisor {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RemoteAdvisor {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl SavingsAdvisor for RemoteAdvisor {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn recommend(&self, request: &RecommendationRequest) -> Result<Recommendation, CoreError> {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Advisor responded with HTTP {status}"),
            });
        }

        let recommendation: Recommendation = resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse recommendation: {e}"),
        })?;

        let daily = recommendation.daily_savings_recommendation;
        if !daily.is_finite() || daily < 0.0 {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Advisor returned an invalid daily amount: {daily}"),
            });
        }

        Ok(recommendation)
    }
}
