//! Radar chart model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::dimension::{Dimension, ScoreMap, SubDimension};
use super::vendor::Vendor;

/// Name given to charts created without one
pub const DEFAULT_CHART_NAME: &str = "New Radar Chart";

// Charts persisted before chart ordering existed carry no order field; the
// loader replaces this sentinel with the chart's array position.
fn order_unset() -> i64 {
    -1
}

/// One complete comparison scenario: vendors scored across weighted dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarChart {
    pub id: Uuid,
    pub name: String,
    /// Display position among charts (dense, 0-based)
    #[serde(default = "order_unset")]
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub vendors: Vec<Vendor>,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
}

impl RadarChart {
    /// Create an empty chart
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            order: 0,
            created_at: now,
            updated_at: now,
            vendors: Vec::new(),
            dimensions: Vec::new(),
        }
    }

    /// Apply a partial update; `None` fields are left untouched
    pub fn apply(&mut self, patch: ChartPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        if let Some(vendors) = patch.vendors {
            self.vendors = vendors;
        }
        if let Some(dimensions) = patch.dimensions {
            self.dimensions = dimensions;
        }
    }

    /// Deep copy with fresh ids.
    ///
    /// Every vendor, dimension and sub-dimension receives a new id; score
    /// maps are rebuilt against the copied vendors. The vendor id map is
    /// built by zipping the source vendors with their copies from the same
    /// construction, so positional correspondence holds by definition.
    pub fn duplicated(&self) -> Self {
        let now = Utc::now();

        let vendors: Vec<Vendor> = self
            .vendors
            .iter()
            .map(|vendor| Vendor {
                id: Uuid::new_v4(),
                ..vendor.clone()
            })
            .collect();

        let vendor_ids: HashMap<Uuid, Uuid> = self
            .vendors
            .iter()
            .zip(vendors.iter())
            .map(|(source, copy)| (source.id, copy.id))
            .collect();

        let remap = |scores: &ScoreMap| -> ScoreMap {
            scores
                .iter()
                .filter_map(|(vendor_id, score)| {
                    vendor_ids.get(vendor_id).map(|new_id| (*new_id, *score))
                })
                .collect()
        };

        let dimensions: Vec<Dimension> = self
            .dimensions
            .iter()
            .map(|dimension| Dimension {
                id: Uuid::new_v4(),
                scores: remap(&dimension.scores),
                sub_dimensions: dimension
                    .sub_dimensions
                    .iter()
                    .map(|sub| SubDimension {
                        id: Uuid::new_v4(),
                        scores: remap(&sub.scores),
                        ..sub.clone()
                    })
                    .collect(),
                ..dimension.clone()
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            name: format!("{} (Copy)", self.name),
            order: self.order,
            created_at: now,
            updated_at: now,
            vendors,
            dimensions,
        }
    }
}

/// Fields for creating a chart (the store assigns id, order and timestamps)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewChart {
    pub name: String,
    #[serde(default)]
    pub vendors: Vec<Vendor>,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
}

/// Partial chart update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartPatch {
    pub name: Option<String>,
    pub order: Option<i64>,
    pub vendors: Option<Vec<Vendor>>,
    pub dimensions: Option<Vec<Dimension>>,
}
