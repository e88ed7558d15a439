//! crates/review_harvest_core/src/sample.rs
//!
//! Deterministic per-month sampling over a materialized review set.

use crate::domain::{MonthKey, Review};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

/// How records are chosen within each calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleMode {
    /// Rank by helpfulness votes descending and keep the top N. Stable:
    /// ties preserve the original relative order.
    TopHelpful,
    /// Draw N without replacement from a per-month seeded RNG. The same
    /// seed, input and mode always reproduce the same subset.
    Random { seed: u64 },
}

/// Selects up to `per_month` reviews from each calendar month.
///
/// Months are emitted in ascending order; within a month the kept records
/// preserve their original relative order. A month with fewer than
/// `per_month` records is kept whole. Empty input yields empty output.
pub fn monthly_sample(reviews: &[Review], per_month: usize, mode: SampleMode) -> Vec<Review> {
    let mut sampled = Vec::new();
    for (month, group) in group_by_month(reviews) {
        match mode {
            SampleMode::TopHelpful => {
                let mut ranked = group;
                // Stable sort keeps original order among equal vote counts.
                ranked.sort_by_key(|r| std::cmp::Reverse(r.votes_up));
                sampled.extend(ranked.into_iter().take(per_month).cloned());
            }
            SampleMode::Random { seed } => {
                let mut rng = StdRng::seed_from_u64(month_seed(seed, month));
                let amount = per_month.min(group.len());
                let mut picked = rand::seq::index::sample(&mut rng, group.len(), amount)
                    .into_vec();
                // Normalize the unordered draw back to input order.
                picked.sort_unstable();
                sampled.extend(picked.into_iter().map(|i| group[i].clone()));
            }
        }
    }
    sampled
}

/// Derives the RNG seed for one month's draw.
///
/// Splitmix64-style finalizer over the caller seed xor the month's stable
/// index scaled by the golden-ratio constant. Keyed by month identity, so
/// adding or removing a month's data never perturbs the draws of other
/// months under the same top-level seed.
fn month_seed(seed: u64, month: MonthKey) -> u64 {
    let mut z = seed ^ (month.index() as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Groups reviews into ascending month buckets, preserving input order
/// within each bucket.
pub(crate) fn group_by_month(reviews: &[Review]) -> BTreeMap<MonthKey, Vec<&Review>> {
    let mut groups: BTreeMap<MonthKey, Vec<&Review>> = BTreeMap::new();
    for review in reviews {
        groups.entry(review.month()).or_default().push(review);
    }
    groups
}
