//! Chart-level operations

use radar_common::model::{ChartPatch, NewChart, RadarChart, DEFAULT_CHART_NAME};
use tracing::warn;
use uuid::Uuid;

use super::{reorder_by_ids, resequence, RadarStore};
use crate::events::StoreEvent;

impl RadarStore {
    /// Create a chart at the end of the list; returns the new id
    pub async fn add_chart(&self, input: NewChart) -> Uuid {
        let mut chart = RadarChart::new(if input.name.is_empty() {
            DEFAULT_CHART_NAME.to_string()
        } else {
            input.name
        });
        chart.vendors = input.vendors;
        chart.dimensions = input.dimensions;
        let id = chart.id;

        let mut state = self.state.write().await;
        chart.order = state
            .charts
            .iter()
            .map(|existing| existing.order)
            .max()
            .unwrap_or(-1)
            + 1;
        state.charts.push(chart);
        drop(state);

        self.emit(StoreEvent::ChartListChanged);
        id
    }

    /// Apply a partial update to a chart
    pub async fn update_chart(&self, chart_id: Uuid, patch: ChartPatch) {
        self.mutate_chart_rescoring(chart_id, |chart| {
            chart.apply(patch);
            true
        })
        .await;
    }

    /// Rename a chart
    pub async fn rename_chart(&self, chart_id: Uuid, name: impl Into<String>) {
        let name = name.into();
        self.mutate_chart(chart_id, |chart| {
            chart.name = name;
            true
        })
        .await;
    }

    /// Remove a chart and its persisted record; clears the active selection
    /// if it pointed at the removed chart
    pub async fn delete_chart(&self, chart_id: Uuid) {
        let mut state = self.state.write().await;
        let before = state.charts.len();
        state.charts.retain(|chart| chart.id != chart_id);
        if state.charts.len() == before {
            return;
        }
        resequence(&mut state.charts);

        let active_cleared = state.active_chart_id == Some(chart_id);
        if active_cleared {
            state.active_chart_id = None;
        }
        drop(state);

        self.emit(StoreEvent::ChartListChanged);
        if active_cleared {
            self.emit(StoreEvent::ActiveChartChanged { chart_id: None });
        }

        // The autosave task only writes live charts; drop the stale record
        if let Err(err) = self.storage.delete_radar_chart(chart_id).await {
            warn!("Failed to delete stored chart {}: {}", chart_id, err);
        }
    }

    /// Assign chart display order from the given id sequence
    pub async fn reorder_charts(&self, chart_ids: &[Uuid]) {
        let mut state = self.state.write().await;
        reorder_by_ids(&mut state.charts, chart_ids);
        drop(state);

        self.emit(StoreEvent::ChartListChanged);
    }

    /// Deep-copy a chart to the end of the list; returns the copy's id
    pub async fn duplicate_chart(&self, chart_id: Uuid) -> Option<Uuid> {
        let mut state = self.state.write().await;
        let source = match state.charts.iter().find(|chart| chart.id == chart_id) {
            Some(chart) => chart,
            None => return None,
        };

        let mut copy = source.duplicated();
        copy.order = state
            .charts
            .iter()
            .map(|existing| existing.order)
            .max()
            .unwrap_or(-1)
            + 1;
        let id = copy.id;
        state.charts.push(copy);
        drop(state);

        self.emit(StoreEvent::ChartListChanged);
        Some(id)
    }

    /// Select the active chart (or clear the selection with `None`)
    pub async fn set_active_chart(&self, chart_id: Option<Uuid>) {
        let mut state = self.state.write().await;
        state.active_chart_id = chart_id;
        drop(state);

        self.emit(StoreEvent::ActiveChartChanged { chart_id });
    }

    /// Id of the active chart, if any
    pub async fn active_chart_id(&self) -> Option<Uuid> {
        self.state.read().await.active_chart_id
    }

    /// Snapshot of the active chart, if any
    pub async fn active_chart(&self) -> Option<RadarChart> {
        let state = self.state.read().await;
        let active = state.active_chart_id?;
        state.charts.iter().find(|chart| chart.id == active).cloned()
    }
}
