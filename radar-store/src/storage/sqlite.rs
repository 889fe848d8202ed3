//! SQLite storage backend
//!
//! Chart rows keep scalar columns for the fields the database indexes or
//! orders by; the vendor and dimension trees ride along as JSON text.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use radar_common::model::RadarChart;
use radar_common::{Error, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

use super::ChartStorage;

/// One chart row: id, name, display_order, created_at, updated_at,
/// vendors JSON, dimensions JSON
type ChartRow = (
    String,
    String,
    i64,
    DateTime<Utc>,
    DateTime<Utc>,
    String,
    String,
);

/// Chart and settings records in a local SQLite database
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open the database at `db_path`, creating file and schema if needed
    pub async fn open(db_path: &Path) -> Result<Self> {
        let newly_created = !db_path.exists();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        if newly_created {
            info!("Initialized new database: {}", db_path.display());
        } else {
            info!("Opened existing database: {}", db_path.display());
        }

        sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

        // WAL keeps reads open while the autosave task writes
        sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

        create_radar_charts_table(&pool).await?;
        create_settings_table(&pool).await?;

        Ok(Self { pool })
    }

    fn chart_from_row(row: ChartRow) -> Result<RadarChart> {
        let (id, name, order, created_at, updated_at, vendors, dimensions) = row;
        let id = Uuid::parse_str(&id)
            .map_err(|err| Error::Internal(format!("invalid chart id in database: {}", err)))?;

        Ok(RadarChart {
            id,
            name,
            order,
            created_at,
            updated_at,
            vendors: serde_json::from_str(&vendors)?,
            dimensions: serde_json::from_str(&dimensions)?,
        })
    }
}

async fn create_radar_charts_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS radar_charts (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            display_order INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL,
            vendors TEXT NOT NULL,
            dimensions TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_radar_charts_order ON radar_charts(display_order)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[async_trait]
impl ChartStorage for SqliteStorage {
    async fn save_radar_chart(&self, chart: &RadarChart) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO radar_charts
                (id, name, display_order, created_at, updated_at, vendors, dimensions)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(chart.id.to_string())
        .bind(&chart.name)
        .bind(chart.order)
        .bind(chart.created_at)
        .bind(chart.updated_at)
        .bind(serde_json::to_string(&chart.vendors)?)
        .bind(serde_json::to_string(&chart.dimensions)?)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_radar_chart(&self, id: Uuid) -> Result<Option<RadarChart>> {
        let row = sqlx::query_as::<_, ChartRow>(
            r#"
            SELECT id, name, display_order, created_at, updated_at, vendors, dimensions
            FROM radar_charts WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::chart_from_row).transpose()
    }

    async fn get_all_radar_charts(&self) -> Result<Vec<RadarChart>> {
        let rows = sqlx::query_as::<_, ChartRow>(
            r#"
            SELECT id, name, display_order, created_at, updated_at, vendors, dimensions
            FROM radar_charts ORDER BY display_order
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::chart_from_row).collect()
    }

    async fn delete_radar_chart(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM radar_charts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn clear_all_radar_charts(&self) -> Result<()> {
        sqlx::query("DELETE FROM radar_charts")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn save_app_settings(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_app_settings(&self, key: &str) -> Result<Option<String>> {
        let value: Option<Option<String>> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value.flatten())
    }

    async fn delete_app_settings(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM settings WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
