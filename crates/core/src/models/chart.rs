use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a saved amount came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavingSource {
    /// A tile marked as saved
    Tile,
    /// A manually logged extra saving
    Extra,
}

impl std::fmt::Display for SavingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SavingSource::Tile => write!(f, "Tile"),
            SavingSource::Extra => write!(f, "Extra"),
        }
    }
}

/// One dated contribution, from either source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingEntry {
    pub plan_id: Uuid,
    pub source: SavingSource,
    pub date: DateTime<Utc>,
    pub amount: f64,
}

/// Total saved in one calendar month. The frontend renders these as bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySavings {
    pub year: i32,
    pub month: u32,

    /// Display label, e.g. "Jan 2025"
    pub label: String,

    pub saved: f64,
}

/// Running total after one contribution. The frontend renders these as an area chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub cumulative: f64,
}
