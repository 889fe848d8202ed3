//! Debounced persistence
//!
//! Mutations arrive as store events; a quiet window coalesces each burst
//! into a single save of the latest state. Save failures are logged and
//! swallowed, the in-memory state stays authoritative for the session.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::warn;

use crate::store::RadarStore;

/// Quiet window before a save fires
pub const AUTO_SAVE_DEBOUNCE: Duration = Duration::from_millis(300);

/// Spawn the autosave task for `store`.
///
/// The task holds its own reference to the store and runs until aborted via
/// the returned handle.
pub fn spawn_autosave(store: Arc<RadarStore>) -> JoinHandle<()> {
    let mut events = store.subscribe();

    tokio::spawn(async move {
        'bursts: loop {
            // Wait for the first mutation of a burst. A lagged receiver
            // means mutations were dropped, which is reason enough to save.
            loop {
                match events.recv().await {
                    Ok(event) if event.schedules_save() => break,
                    Ok(_) => {}
                    Err(RecvError::Lagged(_)) => break,
                    Err(RecvError::Closed) => break 'bursts,
                }
            }

            // Extend the window while mutations keep arriving
            let deadline = sleep(AUTO_SAVE_DEBOUNCE);
            tokio::pin!(deadline);
            loop {
                tokio::select! {
                    _ = &mut deadline => break,
                    event = events.recv() => match event {
                        Ok(event) if event.schedules_save() => {
                            deadline.as_mut().reset(Instant::now() + AUTO_SAVE_DEBOUNCE);
                        }
                        Ok(_) => {}
                        Err(RecvError::Lagged(_)) => {
                            deadline.as_mut().reset(Instant::now() + AUTO_SAVE_DEBOUNCE);
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }

            if let Err(err) = store.save_to_storage().await {
                warn!("Autosave failed: {}", err);
            }
        }
    })
}
