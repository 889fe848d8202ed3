//! Scoring engine
//!
//! Pure functions over the entity models: weighted parent scores, vendor
//! totals and rankings. Nothing here mutates its inputs or performs I/O.

use serde::Serialize;
use uuid::Uuid;

use crate::model::{score_or_zero, Dimension, SubDimension, Vendor};

/// Weighted average of sub-dimension scores for one vendor, on the 0-10
/// scale, rounded to 1 decimal place.
///
/// Normalizes by the actual weight total, so the result stays meaningful
/// while sibling weights are mid-edit and do not yet sum to 100. Returns 0
/// for an empty list or a zero weight total.
pub fn calculate_parent_score(sub_dimensions: &[SubDimension], vendor_id: Uuid) -> f64 {
    if sub_dimensions.is_empty() {
        return 0.0;
    }

    let total_weight: f64 = sub_dimensions.iter().map(|sub| sub.weight).sum();
    if total_weight == 0.0 {
        return 0.0;
    }

    let weighted_sum: f64 = sub_dimensions
        .iter()
        .map(|sub| score_or_zero(&sub.scores, vendor_id) * sub.weight)
        .sum();

    ((weighted_sum / total_weight) * 10.0).round() / 10.0
}

/// Weighted total score of one vendor across top-level dimensions, rounded
/// to 2 decimal places. Returns 0 for an empty list.
///
/// Divides by the nominal 100% rather than the actual weight total: when
/// dimension weights do not sum to 100 the total drifts off scale, and the
/// weight diagnostics are the mechanism that explains it to the user.
pub fn calculate_total_score(dimensions: &[Dimension], vendor_id: Uuid) -> f64 {
    if dimensions.is_empty() {
        return 0.0;
    }

    let weighted_sum: f64 = dimensions
        .iter()
        .map(|dimension| score_or_zero(&dimension.scores, vendor_id) * dimension.weight / 100.0)
        .sum();

    (weighted_sum * 100.0).round() / 100.0
}

/// One row of the scoreboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub vendor: Vendor,
    pub score: f64,
    /// 1-based competition rank; tied scores share a rank
    pub rank: usize,
}

/// Rank all vendors by total score, descending.
///
/// Equal scores share a rank; the next distinct score takes its 1-based
/// position in the sorted list (two vendors tied for first are both rank 1,
/// the next vendor is rank 3). The sort is stable, so tied vendors keep
/// their relative input order.
pub fn rankings(dimensions: &[Dimension], vendors: &[Vendor]) -> Vec<RankingEntry> {
    let mut entries: Vec<RankingEntry> = vendors
        .iter()
        .map(|vendor| RankingEntry {
            vendor: vendor.clone(),
            score: calculate_total_score(dimensions, vendor.id),
            rank: 0,
        })
        .collect();

    entries.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut current_rank = 1;
    for index in 0..entries.len() {
        if index > 0 && entries[index].score < entries[index - 1].score {
            current_rank = index + 1;
        }
        entries[index].rank = current_rank;
    }

    entries
}

/// Whether a dimension's scores are derived from its sub-dimensions
pub fn should_auto_calculate(dimension: &Dimension) -> bool {
    !dimension.sub_dimensions.is_empty()
}

/// Re-derive the score map of every auto-calculated dimension.
///
/// Dimensions with sub-dimensions get their `scores` replaced with freshly
/// computed per-vendor weighted averages, discarding whatever was stored
/// there; dimensions without sub-dimensions pass through unchanged. Inputs
/// are not mutated.
pub fn recalculate_parent_scores(dimensions: &[Dimension], vendors: &[Vendor]) -> Vec<Dimension> {
    dimensions
        .iter()
        .map(|dimension| {
            if !should_auto_calculate(dimension) {
                return dimension.clone();
            }

            let mut updated = dimension.clone();
            updated.scores = vendors
                .iter()
                .map(|vendor| {
                    (
                        vendor.id,
                        calculate_parent_score(&dimension.sub_dimensions, vendor.id),
                    )
                })
                .collect();
            updated
        })
        .collect()
}
