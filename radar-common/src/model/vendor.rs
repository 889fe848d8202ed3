//! Vendor (compared entity) model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marker shape used when rendering a vendor's series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolType {
    Circle,
    Rect,
    Triangle,
    Diamond,
}

/// A compared entity (product, competitor) within one radar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: Uuid,
    pub name: String,
    /// Hex color, e.g. "#3B82F6"
    pub color: String,
    pub symbol: SymbolType,
    /// Display position among siblings (dense, 0-based)
    pub order: i64,
}

impl Vendor {
    /// Create a vendor with a fresh id
    pub fn new(input: NewVendor) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            color: input.color,
            symbol: input.symbol,
            order: input.order,
        }
    }

    /// Apply a partial update; `None` fields are left untouched
    pub fn apply(&mut self, patch: VendorPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(symbol) = patch.symbol {
            self.symbol = symbol;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
    }
}

/// Fields for creating a vendor (the store assigns the id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVendor {
    pub name: String,
    pub color: String,
    pub symbol: SymbolType,
    pub order: i64,
}

/// Partial vendor update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub symbol: Option<SymbolType>,
    pub order: Option<i64>,
}
