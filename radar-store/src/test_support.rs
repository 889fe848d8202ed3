//! In-memory storage double for store and autosave tests

use async_trait::async_trait;
use radar_common::model::RadarChart;
use radar_common::{Error, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::storage::ChartStorage;

/// Route tracing output through the test harness (enable with RUST_LOG)
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Gateway implementation backed by plain collections, with switchable
/// failure injection and call counting
#[derive(Default)]
pub struct MemoryStorage {
    charts: Mutex<Vec<RadarChart>>,
    settings: Mutex<HashMap<String, String>>,
    save_calls: AtomicUsize,
    fail_saves: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a chart record
    pub fn seed_chart(&self, chart: RadarChart) {
        self.charts.lock().unwrap().push(chart);
    }

    /// Pre-populate a setting
    pub fn seed_setting(&self, key: &str, value: &str) {
        self.settings
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    /// Make every save return an error
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Make every read return an error
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of `save_radar_chart` calls so far
    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    /// Snapshot of the stored charts
    pub fn charts(&self) -> Vec<RadarChart> {
        self.charts.lock().unwrap().clone()
    }

    /// Snapshot of one stored setting
    pub fn setting(&self, key: &str) -> Option<String> {
        self.settings.lock().unwrap().get(key).cloned()
    }

    fn check_save(&self) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(Error::Internal("injected save failure".to_string()));
        }
        Ok(())
    }

    fn check_read(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Internal("injected read failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ChartStorage for MemoryStorage {
    async fn save_radar_chart(&self, chart: &RadarChart) -> Result<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        self.check_save()?;
        let mut charts = self.charts.lock().unwrap();
        match charts.iter_mut().find(|c| c.id == chart.id) {
            Some(existing) => *existing = chart.clone(),
            None => charts.push(chart.clone()),
        }
        Ok(())
    }

    async fn get_radar_chart(&self, id: Uuid) -> Result<Option<RadarChart>> {
        self.check_read()?;
        Ok(self.charts.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn get_all_radar_charts(&self) -> Result<Vec<RadarChart>> {
        self.check_read()?;
        Ok(self.charts.lock().unwrap().clone())
    }

    async fn delete_radar_chart(&self, id: Uuid) -> Result<()> {
        self.check_save()?;
        self.charts.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn clear_all_radar_charts(&self) -> Result<()> {
        self.check_save()?;
        self.charts.lock().unwrap().clear();
        Ok(())
    }

    async fn save_app_settings(&self, key: &str, value: &str) -> Result<()> {
        self.check_save()?;
        self.settings
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_app_settings(&self, key: &str) -> Result<Option<String>> {
        self.check_read()?;
        Ok(self.settings.lock().unwrap().get(key).cloned())
    }

    async fn delete_app_settings(&self, key: &str) -> Result<()> {
        self.check_save()?;
        self.settings.lock().unwrap().remove(key);
        Ok(())
    }
}
