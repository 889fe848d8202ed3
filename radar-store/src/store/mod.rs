//! Domain store for radar charts
//!
//! Owns the in-memory chart graph and exposes the mutation surface. Every
//! mutation runs under a single write-lock acquisition, so readers never
//! observe a partially updated graph. Reads hand out cloned snapshots.
//!
//! Mutations referencing unknown ids are silent no-ops: the UI is the only
//! caller and is expected to pass live ids, so a miss means the entity was
//! just removed and there is nothing useful to do about it.

mod charts;
mod dimensions;
mod vendors;


use chrono::{DateTime, Utc};
use radar_common::model::RadarChart;
use radar_common::scoring;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::events::StoreEvent;
use crate::sample;
use crate::storage::{ChartStorage, ACTIVE_CHART_KEY};

/// Buffered store events per subscriber
const EVENT_CHANNEL_CAPACITY: usize = 100;

#[derive(Debug, Default)]
struct StoreState {
    charts: Vec<RadarChart>,
    active_chart_id: Option<Uuid>,
    last_saved: Option<DateTime<Utc>>,
}

/// In-memory chart graph plus persistence wiring
pub struct RadarStore {
    state: RwLock<StoreState>,
    storage: Arc<dyn ChartStorage>,
    events: broadcast::Sender<StoreEvent>,
}

impl RadarStore {
    /// Create an empty store over the given storage backend
    pub fn new(storage: Arc<dyn ChartStorage>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            state: RwLock::new(StoreState::default()),
            storage,
            events,
        })
    }

    /// Subscribe to store events
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub(crate) fn emit(&self, event: StoreEvent) {
        // No receivers is fine
        let _ = self.events.send(event);
    }

    /// Snapshot of all charts in display order
    pub async fn charts(&self) -> Vec<RadarChart> {
        self.state.read().await.charts.clone()
    }

    /// Snapshot of one chart
    pub async fn chart(&self, chart_id: Uuid) -> Option<RadarChart> {
        self.state
            .read()
            .await
            .charts
            .iter()
            .find(|chart| chart.id == chart_id)
            .cloned()
    }

    /// When the state was last written through the gateway
    pub async fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_saved
    }

    /// Apply `mutate` to one chart and bump its `updated_at`.
    ///
    /// The closure reports whether it changed anything; unknown chart ids
    /// and untouched charts leave the state (and timestamp) alone. Returns
    /// whether a change was applied.
    pub(crate) async fn mutate_chart(
        &self,
        chart_id: Uuid,
        mutate: impl FnOnce(&mut RadarChart) -> bool,
    ) -> bool {
        let mut state = self.state.write().await;
        let mut changed = false;
        if let Some(chart) = state.charts.iter_mut().find(|chart| chart.id == chart_id) {
            changed = mutate(chart);
            if changed {
                chart.updated_at = Utc::now();
            }
        }
        drop(state);

        if changed {
            self.emit(StoreEvent::ChartUpdated { chart_id });
        }
        changed
    }

    /// Like [`Self::mutate_chart`], then re-derive auto-calculated parent
    /// scores so they are never stale relative to their sub-dimensions.
    pub(crate) async fn mutate_chart_rescoring(
        &self,
        chart_id: Uuid,
        mutate: impl FnOnce(&mut RadarChart) -> bool,
    ) -> bool {
        self.mutate_chart(chart_id, |chart| {
            if !mutate(chart) {
                return false;
            }
            chart.dimensions = scoring::recalculate_parent_scores(&chart.dimensions, &chart.vendors);
            true
        })
        .await
    }

    /// One-shot initial load through the persistence gateway.
    ///
    /// An empty backend gets a persisted sample chart; charts stored before
    /// ordering existed get their array position as order. Load failures
    /// are caught so the application still starts, with an empty store.
    pub async fn load_from_storage(&self) {
        let mut charts = Vec::new();
        match self.storage.get_all_radar_charts().await {
            Ok(stored) => {
                charts = stored;
                if charts.is_empty() {
                    info!("No stored charts found, creating sample chart");
                    let sample = sample::sample_chart();
                    if let Err(err) = self.storage.save_radar_chart(&sample).await {
                        warn!("Failed to persist sample chart: {}", err);
                    }
                    charts.push(sample);
                }
            }
            Err(err) => {
                error!("Failed to load charts from storage: {}", err);
            }
        }

        for (index, chart) in charts.iter_mut().enumerate() {
            if chart.order < 0 {
                chart.order = index as i64;
            }
        }
        charts.sort_by_key(|chart| chart.order);

        // Parent scores are derived data; refresh them on the way in
        for chart in charts.iter_mut() {
            chart.dimensions =
                scoring::recalculate_parent_scores(&chart.dimensions, &chart.vendors);
        }

        let stored_active = match self.storage.get_app_settings(ACTIVE_CHART_KEY).await {
            Ok(value) => value.and_then(|raw| Uuid::parse_str(&raw).ok()),
            Err(err) => {
                warn!("Failed to load active chart setting: {}", err);
                None
            }
        };
        let active_chart_id = stored_active.or_else(|| charts.first().map(|chart| chart.id));

        info!("Loaded {} chart(s) from storage", charts.len());

        let mut state = self.state.write().await;
        state.charts = charts;
        state.active_chart_id = active_chart_id;
        drop(state);

        self.emit(StoreEvent::ChartListChanged);
        self.emit(StoreEvent::ActiveChartChanged {
            chart_id: active_chart_id,
        });
    }

    /// Persist every chart plus the active selection.
    ///
    /// Best effort: the caller decides what to do with a failure, and the
    /// in-memory state is never rolled back.
    pub async fn save_to_storage(&self) -> radar_common::Result<()> {
        let (charts, active_chart_id) = {
            let state = self.state.read().await;
            (state.charts.clone(), state.active_chart_id)
        };

        for chart in &charts {
            self.storage.save_radar_chart(chart).await?;
        }
        if let Some(active) = active_chart_id {
            self.storage
                .save_app_settings(ACTIVE_CHART_KEY, &active.to_string())
                .await?;
        }

        let now = Utc::now();
        self.state.write().await.last_saved = Some(now);
        self.emit(StoreEvent::StateSaved { timestamp: now });
        Ok(())
    }
}

/// Order/id access shared by every sibling collection
pub(crate) trait SiblingOrder {
    fn id(&self) -> Uuid;
    fn order(&self) -> i64;
    fn set_order(&mut self, order: i64);
}

impl SiblingOrder for RadarChart {
    fn id(&self) -> Uuid {
        self.id
    }
    fn order(&self) -> i64 {
        self.order
    }
    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

impl SiblingOrder for radar_common::model::Vendor {
    fn id(&self) -> Uuid {
        self.id
    }
    fn order(&self) -> i64 {
        self.order
    }
    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

impl SiblingOrder for radar_common::model::Dimension {
    fn id(&self) -> Uuid {
        self.id
    }
    fn order(&self) -> i64 {
        self.order
    }
    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

impl SiblingOrder for radar_common::model::SubDimension {
    fn id(&self) -> Uuid {
        self.id
    }
    fn order(&self) -> i64 {
        self.order
    }
    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

/// Re-sequence sibling orders densely (0..n-1), preserving current order.
/// The sort is stable, so equal orders keep their relative position.
pub(crate) fn resequence<T: SiblingOrder>(items: &mut [T]) {
    items.sort_by_key(|item| item.order());
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order(index as i64);
    }
}

/// Assign orders from an explicit id sequence, then re-sequence densely.
/// Ids missing from `ids` keep their previous order before the final sort.
pub(crate) fn reorder_by_ids<T: SiblingOrder>(items: &mut [T], ids: &[Uuid]) {
    for (index, id) in ids.iter().enumerate() {
        if let Some(item) = items.iter_mut().find(|item| item.id() == *id) {
            item.set_order(index as i64);
        }
    }
    resequence(items);
}
