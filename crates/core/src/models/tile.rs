use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One day's target amount within a plan.
///
/// `amount` is fixed when the plan is created. Only `saved` and
/// `saved_date` change afterwards, when the user marks progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Unique identifier
    pub id: Uuid,

    /// 1-based position in the plan (1..=duration)
    pub day: u32,

    /// Whole currency units, never negative
    pub amount: f64,

    /// Whether the user has put this amount aside
    pub saved: bool,

    /// When the tile was marked as saved
    #[serde(default)]
    pub saved_date: Option<DateTime<Utc>>,
}

impl Tile {
    /// Give a generated draft its identity. New tiles start unsaved.
    pub fn from_draft(draft: TileDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            day: draft.day,
            amount: draft.amount,
            saved: false,
            saved_date: None,
        }
    }
}

/// Generator output before ids are assigned: just the day and its amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDraft {
    pub day: u32,
    pub amount: f64,
}
