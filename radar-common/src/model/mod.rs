//! Entity models for radar comparison charts
//!
//! Ownership is strictly hierarchical: a chart owns its vendors and
//! dimensions, a dimension owns its sub-dimensions. There are no
//! back-references.

mod chart;
mod dimension;
mod vendor;

pub use chart::{ChartPatch, NewChart, RadarChart, DEFAULT_CHART_NAME};
pub use dimension::{
    score_or_zero, Dimension, DimensionPatch, NewDimension, NewSubDimension, ScoreMap,
    SubDimension, SubDimensionPatch,
};
pub use vendor::{NewVendor, SymbolType, Vendor, VendorPatch};
