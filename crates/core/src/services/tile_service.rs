use log::{debug, warn};
use rand::Rng;

use crate::models::denomination::{Intensity, FALLBACK_DENOMINATION};
use crate::models::tile::TileDraft;
use crate::services::denomination_service::DenominationService;

/// Chance that a day takes the denomination closest to the ideal average
/// instead of a random one.
pub const BEST_FIT_PROBABILITY: f64 = 0.7;

/// Upper bound on random corrective steps after the first pass.
pub const MAX_CORRECTION_ATTEMPTS: u32 = 100;

/// The corrective pass stops once the sum is this close to the goal.
pub const CORRECTION_TOLERANCE: f64 = 0.1;

/// Splits a goal into one amount per day.
///
/// Each day takes, with probability [`BEST_FIT_PROBABILITY`], the
/// denomination nearest to what every remaining day would need on average,
/// otherwise a random denomination. The last day absorbs the outstanding
/// remainder. A bounded random corrective pass and a forced adjustment of the
/// last tile then make the amounts add up to the goal exactly.
///
/// Amounts are whole currency units. With a whole-unit goal the sum is exact;
/// the last tile may fall outside the denomination set.
pub struct TileService {
    denomination_service: DenominationService,
}

impl TileService {
    pub fn new() -> Self {
        Self {
            denomination_service: DenominationService::new(),
        }
    }

    /// Select the denominations for `intensity` and generate `duration`
    /// tiles summing to `goal`, using the thread-local RNG.
    pub fn generate_for(&self, goal: f64, duration: u32, intensity: Intensity) -> Vec<TileDraft> {
        let denominations = self.denomination_service.default_denominations(intensity);
        self.generate_tiles(&mut rand::thread_rng(), duration, goal, &denominations)
    }

    /// Generate `duration` tiles (days `1..=duration`) whose amounts sum to `goal`.
    ///
    /// Expects a positive whole-unit `goal`; callers validate before getting here.
    /// An empty `denominations` slice is treated as `[100]`.
    pub fn generate_tiles<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        duration: u32,
        goal: f64,
        denominations: &[f64],
    ) -> Vec<TileDraft> {
        if duration == 0 {
            return Vec::new();
        }
        let fallback = [FALLBACK_DENOMINATION];
        let candidates = if denominations.is_empty() {
            &fallback[..]
        } else {
            denominations
        };

        let mut amounts = Self::first_pass(rng, duration, goal, candidates);
        Self::rebalance(rng, &mut amounts, goal);

        debug!(
            "Generated {duration} tiles for goal {goal} from {} denominations",
            candidates.len()
        );

        amounts
            .into_iter()
            .zip(1..=duration)
            .map(|(amount, day)| TileDraft { day, amount })
            .collect()
    }

    /// Greedy-nearest / random mix, one amount per day.
    fn first_pass<R: Rng + ?Sized>(
        rng: &mut R,
        duration: u32,
        goal: f64,
        candidates: &[f64],
    ) -> Vec<f64> {
        let mut amounts = Vec::with_capacity(duration as usize);
        // Tracks the unrounded amounts, as the ideal average is based on them.
        let mut current_total = 0.0;

        for day in 1..=duration {
            let remaining_days = f64::from(duration - day + 1);
            let outstanding = goal - current_total;
            let ideal_average = outstanding / remaining_days;

            let best_fit = Self::nearest(candidates, ideal_average);
            let random_pick = candidates[rng.gen_range(0..candidates.len())];
            let chosen = if rng.gen_bool(BEST_FIT_PROBABILITY) {
                best_fit
            } else {
                random_pick
            };

            let amount = if day == duration && outstanding > 0.0 {
                outstanding
            } else {
                chosen
            };

            amounts.push(amount.round());
            current_total += amount;
        }

        amounts
    }

    /// Closest candidate to `target`; on ties the earliest one wins.
    fn nearest(candidates: &[f64], target: f64) -> f64 {
        let mut best = candidates[0];
        for &candidate in &candidates[1..] {
            if (candidate - target).abs() < (best - target).abs() {
                best = candidate;
            }
        }
        best
    }

    /// Push the amounts onto the goal: random nudges first, then a forced
    /// adjustment of the last tile.
    fn rebalance<R: Rng + ?Sized>(rng: &mut R, amounts: &mut [f64], goal: f64) {
        let Some(last) = amounts.len().checked_sub(1) else {
            return;
        };

        let mut diff = goal - amounts.iter().sum::<f64>();
        let mut attempts = 0;
        while diff.abs() > CORRECTION_TOLERANCE && attempts < MAX_CORRECTION_ATTEMPTS {
            let idx = rng.gen_range(0..amounts.len());
            let adjustment = rng.gen::<f64>() * diff;
            amounts[idx] = (amounts[idx] + adjustment).round().max(0.0);

            diff = goal - amounts.iter().sum::<f64>();
            attempts += 1;
        }

        if diff.abs() > CORRECTION_TOLERANCE {
            debug!(
                "Corrective pass stopped after {attempts} attempts with {diff} outstanding; \
                 moving it onto the last tile"
            );
        }

        amounts[last] = (amounts[last] + diff).round().max(0.0);

        // The clamp above leaves an excess when the last tile could not absorb
        // a large overshoot. Take it back from the end, never below zero.
        let mut excess = amounts.iter().sum::<f64>() - goal;
        if excess > CORRECTION_TOLERANCE {
            warn!("Last tile clamped at zero; removing remaining excess of {excess} from earlier tiles");
            for amount in amounts.iter_mut().rev() {
                if excess <= 0.0 {
                    break;
                }
                let taken = amount.min(excess);
                *amount -= taken;
                excess -= taken;
            }
        }
    }
}

impl Default for TileService {
    fn default() -> Self {
        Self::new()
    }
}
