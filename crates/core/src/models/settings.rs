use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Currency new plans are created in unless the user changes it.
pub const DEFAULT_CURRENCY: &str = "LKR";

/// User-configurable settings, stored inside the user data tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Currency code stamped on new plans (e.g., "LKR").
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Endpoint of a remote savings advisor. When unset the local
    /// heuristic advisor is used.
    #[serde(default)]
    pub advisor_endpoint: Option<String>,

    /// Optional API keys for remote services.
    /// Keys: service name (e.g., "advisor"). Values: the API key string.
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            advisor_endpoint: None,
            api_keys: HashMap::new(),
        }
    }
}
