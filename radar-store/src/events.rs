//! Store event types
//!
//! Every mutation broadcasts one of these; the autosave task is the first
//! consumer, UI layers subscribe the same way.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events emitted by [`crate::store::RadarStore`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StoreEvent {
    /// A chart was added, removed, duplicated, or the chart list reordered
    ChartListChanged,

    /// Content of one chart changed (vendors, dimensions, scores, metadata)
    ChartUpdated {
        /// Chart that was mutated
        chart_id: Uuid,
    },

    /// The active chart selection changed
    ActiveChartChanged {
        /// Newly active chart, `None` when the selection was cleared
        chart_id: Option<Uuid>,
    },

    /// State was written through the persistence gateway
    StateSaved {
        /// When the save completed
        timestamp: DateTime<Utc>,
    },
}

impl StoreEvent {
    /// Whether this event represents a mutation that should schedule a save.
    ///
    /// `StateSaved` is excluded so a completed save cannot schedule another.
    pub fn schedules_save(&self) -> bool {
        !matches!(self, StoreEvent::StateSaved { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_event_does_not_reschedule() {
        assert!(StoreEvent::ChartListChanged.schedules_save());
        assert!(StoreEvent::ChartUpdated {
            chart_id: Uuid::new_v4()
        }
        .schedules_save());
        assert!(!StoreEvent::StateSaved {
            timestamp: Utc::now()
        }
        .schedules_save());
    }
}
