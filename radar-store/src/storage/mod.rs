//! Persistence gateway
//!
//! The store persists through this abstract key-value record interface.
//! Two interchangeable backends implement it: a structured local database
//! ([`SqliteStorage`]) and a flat JSON file ([`FileStorage`]). Charts
//! round-trip through either with date fields reconstructed as real
//! timestamps and nested collections intact.

mod file;
mod sqlite;

pub use file::FileStorage;
pub use sqlite::SqliteStorage;

use async_trait::async_trait;
use radar_common::model::RadarChart;
use radar_common::Result;
use uuid::Uuid;

/// Settings key holding the id of the currently active chart
pub const ACTIVE_CHART_KEY: &str = "activeChartId";

/// Abstract record store for charts and app settings
#[async_trait]
pub trait ChartStorage: Send + Sync {
    /// Insert or replace one chart record
    async fn save_radar_chart(&self, chart: &RadarChart) -> Result<()>;

    /// Fetch one chart by id
    async fn get_radar_chart(&self, id: Uuid) -> Result<Option<RadarChart>>;

    /// Fetch every stored chart
    async fn get_all_radar_charts(&self) -> Result<Vec<RadarChart>>;

    /// Remove one chart record; absent ids are not an error
    async fn delete_radar_chart(&self, id: Uuid) -> Result<()>;

    /// Remove every chart record
    async fn clear_all_radar_charts(&self) -> Result<()>;

    /// Insert or replace one app setting
    async fn save_app_settings(&self, key: &str, value: &str) -> Result<()>;

    /// Fetch one app setting
    async fn get_app_settings(&self, key: &str) -> Result<Option<String>>;

    /// Remove one app setting; absent keys are not an error
    async fn delete_app_settings(&self, key: &str) -> Result<()>;
}
