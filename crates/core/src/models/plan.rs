use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::denomination::Intensity;
use super::tile::Tile;

/// A savings plan: a goal split into one tile per day.
///
/// At creation `tiles.len() == duration`, tiles are ordered by day, and the
/// tile amounts add up to `goal` exactly. Editing the goal later does not
/// regenerate the tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Unique identifier
    pub id: Uuid,

    /// Display name (e.g., "New Laptop Fund")
    pub name: String,

    /// Target amount in whole currency units
    pub goal: f64,

    /// Number of days, one tile per day
    pub duration: u32,

    /// Intensity chosen at creation; fixed afterwards
    pub intensity: Intensity,

    /// When the plan was created
    pub start_date: DateTime<Utc>,

    /// Daily amounts, sorted by `day`
    pub tiles: Vec<Tile>,

    /// Contributions logged outside the tile schedule, oldest first
    #[serde(default)]
    pub extra_savings: Vec<ExtraSaving>,

    /// Currency code the amounts are expressed in (e.g., "LKR")
    pub currency: String,
}

impl Plan {
    /// Sum of all tile amounts, saved or not.
    pub fn scheduled_total(&self) -> f64 {
        self.tiles.iter().map(|t| t.amount).sum()
    }

    pub fn tile(&self, tile_id: Uuid) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == tile_id)
    }
}

/// An ad-hoc contribution not tied to a tile. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraSaving {
    pub id: Uuid,
    pub amount: f64,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// User input for a new plan. Everything else is derived at creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlan {
    pub name: String,
    pub goal: f64,
    pub duration: u32,
    pub intensity: u8,
}

/// Editable fields of an existing plan. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanUpdate {
    pub name: Option<String>,
    pub goal: Option<f64>,
}

/// User input for an extra saving; id and date are assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExtraSaving {
    pub amount: f64,
    pub description: String,
}

impl NewExtraSaving {
    pub fn new(amount: f64, description: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
        }
    }
}
