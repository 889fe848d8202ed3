//! Data folder resolution and storage backend selection

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

use crate::storage::{ChartStorage, FileStorage, SqliteStorage};

/// Environment variable overriding the data folder
pub const DATA_FOLDER_ENV: &str = "RADAR_BENCH_DATA";

/// Database file name within the data folder
pub const DATABASE_FILE: &str = "radar-bench.db";

/// Fallback flat-file name within the data folder
pub const FALLBACK_FILE: &str = "radar-bench.json";

/// Resolve the data folder, priority order:
/// 1. Explicit argument (highest priority)
/// 2. RADAR_BENCH_DATA environment variable
/// 3. `data_folder` key in the platform config file
/// 4. OS-dependent default under the local data directory
pub fn resolve_data_folder(explicit: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var(DATA_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = data_folder_from_config_file() {
        return path;
    }

    default_data_folder()
}

/// Platform config file location (`<config dir>/radar-bench/config.toml`)
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("radar-bench").join("config.toml"))
}

fn data_folder_from_config_file() -> Option<PathBuf> {
    let path = config_file_path()?;
    let raw = std::fs::read_to_string(path).ok()?;
    let config = toml::from_str::<toml::Value>(&raw).ok()?;
    config
        .get("data_folder")
        .and_then(|value| value.as_str())
        .map(PathBuf::from)
}

/// OS-dependent default data folder
pub fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("radar-bench"))
        .unwrap_or_else(|| PathBuf::from("./radar-bench-data"))
}

/// Open the preferred storage backend, degrading gracefully.
///
/// Tries the SQLite database first; if it cannot be opened the flat-file
/// backend takes over so the application still starts.
pub async fn open_storage(data_folder: &Path) -> Arc<dyn ChartStorage> {
    match SqliteStorage::open(&data_folder.join(DATABASE_FILE)).await {
        Ok(storage) => Arc::new(storage),
        Err(err) => {
            warn!(
                "SQLite storage unavailable ({}), falling back to flat file",
                err
            );
            Arc::new(FileStorage::new(data_folder.join(FALLBACK_FILE)))
        }
    }
}
