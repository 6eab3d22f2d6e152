use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::plan::Plan;

/// A named group of plans (e.g., "Personal", "Household").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub plans: Vec<Plan>,
}

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            plans: Vec::new(),
        }
    }

    pub fn plan(&self, plan_id: Uuid) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == plan_id)
    }
}
