use std::collections::BTreeMap;

use chrono::Datelike;

use crate::models::account::Account;
use crate::models::chart::{CumulativePoint, MonthlySavings, SavingEntry, SavingSource};
use crate::models::plan::Plan;
use crate::models::progress::DashboardSummary;
use crate::services::progress_service::ProgressService;

/// How many months the monthly chart shows.
pub const MONTHLY_WINDOW: usize = 12;

/// Dashboard totals and chart-ready savings series.
///
/// The core computes all the numbers; the frontend only renders them.
pub struct AnalyticsService {
    progress_service: ProgressService,
}

impl AnalyticsService {
    pub fn new() -> Self {
        Self {
            progress_service: ProgressService::new(),
        }
    }

    /// Totals across every plan in `account`.
    ///
    /// `default_currency` is reported when the account has no plans yet.
    pub fn dashboard_summary(&self, account: &Account, default_currency: &str) -> DashboardSummary {
        let plans: Vec<_> = account
            .plans
            .iter()
            .map(|p| self.progress_service.plan_progress(p))
            .collect();

        let total_goal: f64 = plans.iter().map(|p| p.goal).sum();
        let total_saved: f64 = plans.iter().map(|p| p.total_saved).sum();

        DashboardSummary {
            account_id: account.id,
            account_name: account.name.clone(),
            currency: account
                .plans
                .first()
                .map_or_else(|| default_currency.to_string(), |p| p.currency.clone()),
            plan_count: account.plans.len(),
            total_goal,
            total_saved,
            total_remaining: (total_goal - total_saved).max(0.0),
            overall_progress_pct: if total_goal > 0.0 {
                total_saved / total_goal * 100.0
            } else {
                0.0
            },
            plans,
        }
    }

    /// Every dated contribution across `plans`, oldest first.
    ///
    /// Saved tiles without a date are skipped; they can't be placed on a timeline.
    pub fn savings_history(&self, plans: &[Plan]) -> Vec<SavingEntry> {
        let mut entries: Vec<SavingEntry> = Vec::new();

        for plan in plans {
            for tile in plan.tiles.iter().filter(|t| t.saved) {
                if let Some(date) = tile.saved_date {
                    entries.push(SavingEntry {
                        plan_id: plan.id,
                        source: SavingSource::Tile,
                        date,
                        amount: tile.amount,
                    });
                }
            }
            for extra in &plan.extra_savings {
                entries.push(SavingEntry {
                    plan_id: plan.id,
                    source: SavingSource::Extra,
                    date: extra.date,
                    amount: extra.amount,
                });
            }
        }

        // Stable sort keeps plan order for contributions at the same instant.
        entries.sort_by_key(|e| e.date);
        entries
    }

    /// Saved amount per calendar month, chronological, limited to the last
    /// [`MONTHLY_WINDOW`] months that have any savings.
    pub fn monthly_savings(&self, plans: &[Plan]) -> Vec<MonthlySavings> {
        let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
        for entry in self.savings_history(plans) {
            *by_month
                .entry((entry.date.year(), entry.date.month()))
                .or_insert(0.0) += entry.amount;
        }

        let skip = by_month.len().saturating_sub(MONTHLY_WINDOW);
        by_month
            .into_iter()
            .skip(skip)
            .map(|((year, month), saved)| MonthlySavings {
                year,
                month,
                label: month_label(year, month),
                saved,
            })
            .collect()
    }

    /// Running total after each contribution.
    pub fn cumulative_savings(&self, plans: &[Plan]) -> Vec<CumulativePoint> {
        let mut cumulative = 0.0;
        self.savings_history(plans)
            .into_iter()
            .map(|entry| {
                cumulative += entry.amount;
                CumulativePoint {
                    date: entry.date.date_naive(),
                    cumulative,
                }
            })
            .collect()
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}

/// "Jan 2025" style label.
fn month_label(year: i32, month: u32) -> String {
    chrono::NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{year}-{month:02}"))
}
