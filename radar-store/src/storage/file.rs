//! Flat-file storage backend
//!
//! A single JSON document holding every chart plus the settings map, read
//! and rewritten whole on each operation. Serves as the fallback when the
//! SQLite backend cannot be opened; the store behaves identically against
//! either.

use async_trait::async_trait;
use radar_common::model::RadarChart;
use radar_common::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

use super::ChartStorage;

/// On-disk document layout
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    charts: Vec<RadarChart>,
    #[serde(default)]
    settings: HashMap<String, String>,
}

/// Chart and settings records in a single JSON file
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Use (or create on first write) the document at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_document(&self) -> Result<StoreDocument> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(StoreDocument::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn write_document(&self, document: &StoreDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_string_pretty(document)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

#[async_trait]
impl ChartStorage for FileStorage {
    async fn save_radar_chart(&self, chart: &RadarChart) -> Result<()> {
        let mut document = self.read_document().await?;
        match document.charts.iter_mut().find(|c| c.id == chart.id) {
            Some(existing) => *existing = chart.clone(),
            None => document.charts.push(chart.clone()),
        }
        self.write_document(&document).await
    }

    async fn get_radar_chart(&self, id: Uuid) -> Result<Option<RadarChart>> {
        let document = self.read_document().await?;
        Ok(document.charts.into_iter().find(|c| c.id == id))
    }

    async fn get_all_radar_charts(&self) -> Result<Vec<RadarChart>> {
        Ok(self.read_document().await?.charts)
    }

    async fn delete_radar_chart(&self, id: Uuid) -> Result<()> {
        let mut document = self.read_document().await?;
        document.charts.retain(|c| c.id != id);
        self.write_document(&document).await
    }

    async fn clear_all_radar_charts(&self) -> Result<()> {
        let mut document = self.read_document().await?;
        document.charts.clear();
        self.write_document(&document).await
    }

    async fn save_app_settings(&self, key: &str, value: &str) -> Result<()> {
        let mut document = self.read_document().await?;
        document.settings.insert(key.to_string(), value.to_string());
        self.write_document(&document).await
    }

    async fn get_app_settings(&self, key: &str) -> Result<Option<String>> {
        let document = self.read_document().await?;
        Ok(document.settings.get(key).cloned())
    }

    async fn delete_app_settings(&self, key: &str) -> Result<()> {
        let mut document = self.read_document().await?;
        document.settings.remove(key);
        self.write_document(&document).await
    }
}
