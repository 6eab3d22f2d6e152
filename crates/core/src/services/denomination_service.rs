use log::warn;

use crate::models::denomination::{Intensity, DENOMINATIONS, FALLBACK_DENOMINATION};

/// Narrows the master denomination list to the band an intensity level allows.
///
/// | Intensity | Kept values        |
/// |-----------|--------------------|
/// | 1–3       | `<= 100`           |
/// | 4–6       | `10..=1000`        |
/// | 7–10      | `>= 100`           |
///
/// The result is never empty: when nothing in the master list fits the band,
/// it falls back to `[100]`.
pub struct DenominationService;

impl DenominationService {
    pub fn new() -> Self {
        Self
    }

    /// Filter `master` for `intensity`, keeping the master list's order.
    pub fn select_denominations(&self, master: &[f64], intensity: Intensity) -> Vec<f64> {
        let tier = intensity.tier();
        let selected: Vec<f64> = master.iter().copied().filter(|&v| tier.admits(v)).collect();

        if selected.is_empty() {
            warn!(
                "No denomination in the master list fits the {tier} tier (intensity {intensity}); \
                 falling back to {FALLBACK_DENOMINATION}"
            );
            return vec![FALLBACK_DENOMINATION];
        }
        selected
    }

    /// [`select_denominations`](Self::select_denominations) over the built-in LKR list.
    pub fn default_denominations(&self, intensity: Intensity) -> Vec<f64> {
        self.select_denominations(&DENOMINATIONS, intensity)
    }
}

impl Default for DenominationService {
    fn default() -> Self {
        Self::new()
    }
}
