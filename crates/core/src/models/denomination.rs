use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Master list of allowed daily amounts: the LKR coin and note face values.
pub const DENOMINATIONS: [f64; 11] = [
    1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 500.0, 1000.0, 2000.0, 5000.0,
];

/// Used when an intensity tier filters out every value of the master list.
pub const FALLBACK_DENOMINATION: f64 = 100.0;

/// How aggressive a plan's daily amounts should feel, from 1 (gentle) to 10 (hard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(level: u8) -> Result<Self, CoreError> {
        if !(Self::MIN..=Self::MAX).contains(&level) {
            return Err(CoreError::ValidationError(format!(
                "Intensity must be between {} and {}, got {level}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(level))
    }

    pub fn level(self) -> u8 {
        self.0
    }

    pub fn tier(self) -> IntensityTier {
        match self.0 {
            1..=3 => IntensityTier::Low,
            4..=6 => IntensityTier::Medium,
            _ => IntensityTier::High,
        }
    }
}

impl TryFrom<u8> for Intensity {
    type Error = CoreError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Intensity> for u8 {
    fn from(intensity: Intensity) -> Self {
        intensity.0
    }
}

impl std::fmt::Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Denomination band an intensity level maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntensityTier {
    /// Levels 1–3: amounts up to 100
    Low,
    /// Levels 4–6: amounts from 10 to 1000
    Medium,
    /// Levels 7–10: amounts of 100 and above
    High,
}

impl IntensityTier {
    /// Whether `value` belongs to this tier's band (bounds inclusive).
    pub fn admits(self, value: f64) -> bool {
        match self {
            IntensityTier::Low => value <= 100.0,
            IntensityTier::Medium => (10.0..=1000.0).contains(&value),
            IntensityTier::High => value >= 100.0,
        }
    }
}

impl std::fmt::Display for IntensityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntensityTier::Low => write!(f, "Low"),
            IntensityTier::Medium => write!(f, "Medium"),
            IntensityTier::High => write!(f, "High"),
        }
    }
}
