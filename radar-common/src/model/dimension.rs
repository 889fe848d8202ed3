//! Dimension and sub-dimension models

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Per-vendor scores keyed by vendor id.
///
/// Logically sparse: a vendor without an entry reads as 0. The map is never
/// force-synced against the owning chart's vendor set.
pub type ScoreMap = HashMap<Uuid, f64>;

/// Read a score, defaulting to 0 for vendors without an entry
pub fn score_or_zero(scores: &ScoreMap, vendor_id: Uuid) -> f64 {
    scores.get(&vendor_id).copied().unwrap_or(0.0)
}

/// A weighted child axis; the parent dimension's score derives from these
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubDimension {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Contribution among siblings, 0-100
    pub weight: f64,
    /// Display position among siblings (dense, 0-based)
    pub order: i64,
    #[serde(default)]
    pub scores: ScoreMap,
}

impl SubDimension {
    /// Create a sub-dimension with a fresh id
    pub fn new(input: NewSubDimension) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            weight: input.weight,
            order: input.order,
            scores: input.scores,
        }
    }

    /// Apply a partial update; `None` fields are left untouched
    pub fn apply(&mut self, patch: SubDimensionPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        if let Some(scores) = patch.scores {
            self.scores = scores;
        }
    }
}

/// A top-level weighted evaluation axis.
///
/// With sub-dimensions present, `scores` is a derived projection of their
/// weighted averages and is overwritten on every recomputation; without
/// them it holds the authored per-vendor ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Contribution to the chart total, 0-100
    pub weight: f64,
    /// Display position among siblings (dense, 0-based)
    pub order: i64,
    #[serde(default)]
    pub scores: ScoreMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_dimensions: Vec<SubDimension>,
}

impl Dimension {
    /// Create a dimension with a fresh id
    pub fn new(input: NewDimension) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            weight: input.weight,
            order: input.order,
            scores: input.scores,
            sub_dimensions: input.sub_dimensions,
        }
    }

    /// Apply a partial update; `None` fields are left untouched
    pub fn apply(&mut self, patch: DimensionPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        if let Some(scores) = patch.scores {
            self.scores = scores;
        }
        if let Some(sub_dimensions) = patch.sub_dimensions {
            self.sub_dimensions = sub_dimensions;
        }
    }
}

/// Fields for creating a sub-dimension (the store assigns the id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubDimension {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub weight: f64,
    pub order: i64,
    #[serde(default)]
    pub scores: ScoreMap,
}

/// Partial sub-dimension update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubDimensionPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub weight: Option<f64>,
    pub order: Option<i64>,
    pub scores: Option<ScoreMap>,
}

/// Fields for creating a dimension (the store assigns the id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDimension {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub weight: f64,
    pub order: i64,
    #[serde(default)]
    pub scores: ScoreMap,
    #[serde(default)]
    pub sub_dimensions: Vec<SubDimension>,
}

/// Partial dimension update; `scores` and `sub_dimensions` replace wholesale
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DimensionPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub weight: Option<f64>,
    pub order: Option<i64>,
    pub scores: Option<ScoreMap>,
    pub sub_dimensions: Option<Vec<SubDimension>>,
}
