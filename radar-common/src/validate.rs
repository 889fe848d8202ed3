//! Validation rules and weight diagnostics
//!
//! Everything here is advisory: checks produce [`ValidationIssue`] values
//! for the UI to surface inline, and never block a mutation. Weight checks
//! are derived state, recomputed whenever the dimension tree changes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Dimension, ScoreMap, SubDimension};

/// Expected sibling weight total, in percent
pub const WEIGHT_TOTAL: f64 = 100.0;

/// Float tolerance when comparing weight totals against 100
pub const WEIGHT_TOLERANCE: f64 = 0.01;

/// Inclusive score bounds
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 10.0;

/// What a diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    TotalWeight,
    SubWeight,
    ScoreRange,
    MissingData,
}

/// How strongly the UI should surface a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// A non-fatal diagnostic consumed by the UI for inline warnings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub message: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_dimension_id: Option<Uuid>,
}

/// Outcome of one weight-sum check
#[derive(Debug, Clone, PartialEq)]
pub struct WeightCheck {
    pub is_valid: bool,
    pub total: f64,
    pub issue: Option<ValidationIssue>,
}

/// A weight is a finite value in 0-100
pub fn is_weight_valid(weight: f64) -> bool {
    weight.is_finite() && (0.0..=WEIGHT_TOTAL).contains(&weight)
}

/// A score is a finite integer in 0-10
pub fn is_score_valid(score: f64) -> bool {
    score.is_finite() && score.fract() == 0.0 && (SCORE_MIN..=SCORE_MAX).contains(&score)
}

/// Check that top-level dimension weights sum to 100 (within tolerance).
///
/// An empty dimension list is reported as missing data rather than a weight
/// mismatch.
pub fn validate_dimensions_weight(dimensions: &[Dimension]) -> WeightCheck {
    if dimensions.is_empty() {
        return WeightCheck {
            is_valid: false,
            total: 0.0,
            issue: Some(ValidationIssue {
                kind: IssueKind::MissingData,
                message: "No dimensions found".to_string(),
                severity: Severity::Error,
                dimension_id: None,
                sub_dimension_id: None,
            }),
        };
    }

    let total: f64 = dimensions.iter().map(|dimension| dimension.weight).sum();
    let is_valid = (total - WEIGHT_TOTAL).abs() < WEIGHT_TOLERANCE;
    let issue = if is_valid {
        None
    } else {
        Some(ValidationIssue {
            kind: IssueKind::TotalWeight,
            message: format!("Dimension weights sum to {:.1}%, must be 100%", total),
            severity: Severity::Error,
            dimension_id: None,
            sub_dimension_id: None,
        })
    };

    WeightCheck {
        is_valid,
        total,
        issue,
    }
}

/// Check that one dimension's sub-dimension weights sum to 100 (within
/// tolerance). Having no sub-dimensions is legal and reports valid.
pub fn validate_sub_dimensions_weight(
    sub_dimensions: &[SubDimension],
    dimension_id: Uuid,
    dimension_name: &str,
) -> WeightCheck {
    if sub_dimensions.is_empty() {
        return WeightCheck {
            is_valid: true,
            total: 0.0,
            issue: None,
        };
    }

    let total: f64 = sub_dimensions.iter().map(|sub| sub.weight).sum();
    let is_valid = (total - WEIGHT_TOTAL).abs() < WEIGHT_TOLERANCE;
    let issue = if is_valid {
        None
    } else {
        Some(ValidationIssue {
            kind: IssueKind::SubWeight,
            message: format!(
                "Sub-dimensions of \"{}\" sum to {:.1}%, must be 100%",
                dimension_name, total
            ),
            severity: Severity::Error,
            dimension_id: Some(dimension_id),
            sub_dimension_id: None,
        })
    };

    WeightCheck {
        is_valid,
        total,
        issue,
    }
}

/// Run the top-level check plus every per-dimension sub-check, collecting
/// all issues in order.
pub fn validate_all_weights(dimensions: &[Dimension]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if let Some(issue) = validate_dimensions_weight(dimensions).issue {
        issues.push(issue);
    }

    for dimension in dimensions {
        if dimension.sub_dimensions.is_empty() {
            continue;
        }
        let check = validate_sub_dimensions_weight(
            &dimension.sub_dimensions,
            dimension.id,
            &dimension.name,
        );
        if let Some(issue) = check.issue {
            issues.push(issue);
        }
    }

    issues
}

/// Range-check every entry of a score map, for input boundaries
pub fn validate_scores(scores: &ScoreMap) -> Vec<ValidationIssue> {
    scores
        .iter()
        .filter(|(_, score)| !is_score_valid(**score))
        .map(|(vendor_id, score)| ValidationIssue {
            kind: IssueKind::ScoreRange,
            message: format!(
                "Invalid score {} for vendor {}. Score must be an integer between 0 and 10.",
                score, vendor_id
            ),
            severity: Severity::Error,
            dimension_id: None,
            sub_dimension_id: None,
        })
        .collect()
}

/// Rescale weights proportionally so they sum to 100, rounded to 1 decimal
/// place. A zero total splits evenly instead.
pub fn normalize_weights(weights: &[f64]) -> Vec<f64> {
    if weights.is_empty() {
        return Vec::new();
    }

    let total: f64 = weights.iter().sum();
    if total == 0.0 {
        let even = WEIGHT_TOTAL / weights.len() as f64;
        return vec![even; weights.len()];
    }

    weights
        .iter()
        .map(|weight| (weight / total * WEIGHT_TOTAL * 10.0).round() / 10.0)
        .collect()
}

/// Split 100 evenly across `count` siblings, front-loading the remainder so
/// every weight is a whole number.
pub fn distribute_weights_evenly(count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![WEIGHT_TOTAL];
    }

    let base = 100 / count;
    let remainder = 100 - base * count;
    (0..count)
        .map(|index| {
            if index < remainder {
                (base + 1) as f64
            } else {
                base as f64
            }
        })
        .collect()
}
