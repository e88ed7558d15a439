//! crates/review_harvest_core/src/aggregate.rs
//!
//! Per-month totals and positive share over a materialized review set.

use crate::domain::{MonthKey, Review};
use crate::error::HarvestError;
use crate::sample::group_by_month;

/// One row of the monthly summary.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummaryRow {
    pub month: MonthKey,
    pub total_reviews: u64,
    pub positive: u64,
    pub negative: u64,
    /// `positive / total_reviews`, rounded to 3 decimal places.
    pub pos_share: f64,
}

/// Groups reviews by calendar month and computes per-month totals,
/// sorted month-ascending.
pub fn monthly_summary(reviews: &[Review]) -> Result<Vec<MonthlySummaryRow>, HarvestError> {
    group_by_month(reviews)
        .into_iter()
        .map(|(month, group)| summarize_month(month, &group))
        .collect()
}

/// Summarizes one month group. Grouping never produces an empty group; the
/// [`HarvestError::DivisionUndefined`] arm guards future refactors of the
/// grouping path.
fn summarize_month(month: MonthKey, group: &[&Review]) -> Result<MonthlySummaryRow, HarvestError> {
    let total_reviews = group.len() as u64;
    if total_reviews == 0 {
        return Err(HarvestError::DivisionUndefined);
    }
    let positive = group.iter().filter(|r| r.voted_up).count() as u64;
    let pos_share = (positive as f64 / total_reviews as f64 * 1000.0).round() / 1000.0;
    Ok(MonthlySummaryRow {
        month,
        total_reviews,
        positive,
        negative: total_reviews - positive,
        pos_share,
    })
}
