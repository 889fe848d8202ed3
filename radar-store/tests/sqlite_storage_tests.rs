//! SQLite backend round-trip tests

use radar_store::{ChartStorage, SqliteStorage};

use radar_common::model::{
    Dimension, RadarChart, ScoreMap, SubDimension, SymbolType, Vendor,
};
use tempfile::TempDir;
use uuid::Uuid;

fn fixture_chart() -> RadarChart {
    let mut chart = RadarChart::new("Routers");
    let v1 = Vendor {
        id: Uuid::new_v4(),
        name: "Omada".to_string(),
        color: "#3B82F6".to_string(),
        symbol: SymbolType::Circle,
        order: 0,
    };
    let v2 = Vendor {
        id: Uuid::new_v4(),
        name: "Competitor A".to_string(),
        color: "#10B981".to_string(),
        symbol: SymbolType::Rect,
        order: 1,
    };
    chart.dimensions = vec![Dimension {
        id: Uuid::new_v4(),
        name: "Coverage".to_string(),
        description: Some("Signal coverage".to_string()),
        weight: 100.0,
        order: 0,
        scores: ScoreMap::from([(v1.id, 8.0), (v2.id, 6.0)]),
        sub_dimensions: vec![SubDimension {
            id: Uuid::new_v4(),
            name: "Range".to_string(),
            description: None,
            weight: 100.0,
            order: 0,
            scores: ScoreMap::from([(v1.id, 8.0), (v2.id, 6.0)]),
        }],
    }];
    chart.vendors = vec![v1, v2];
    chart
}

async fn open_storage(dir: &TempDir) -> SqliteStorage {
    SqliteStorage::open(&dir.path().join("test.db"))
        .await
        .unwrap()
}

#[tokio::test]
async fn chart_round_trips_with_dates_and_nested_collections() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir).await;
    let chart = fixture_chart();

    storage.save_radar_chart(&chart).await.unwrap();
    let restored = storage.get_radar_chart(chart.id).await.unwrap().unwrap();

    assert_eq!(restored, chart);
    // Date fields come back as real timestamps, not strings
    assert_eq!(restored.created_at, chart.created_at);
    assert_eq!(restored.updated_at, chart.updated_at);
}

#[tokio::test]
async fn get_absent_chart_returns_none() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir).await;

    assert!(storage.get_radar_chart(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn save_is_an_upsert() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir).await;
    let mut chart = fixture_chart();

    storage.save_radar_chart(&chart).await.unwrap();
    chart.name = "Routers v2".to_string();
    storage.save_radar_chart(&chart).await.unwrap();

    let all = storage.get_all_radar_charts().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Routers v2");
}

#[tokio::test]
async fn get_all_returns_charts_in_display_order() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir).await;

    let mut second = RadarChart::new("Second");
    second.order = 1;
    let mut first = RadarChart::new("First");
    first.order = 0;
    storage.save_radar_chart(&second).await.unwrap();
    storage.save_radar_chart(&first).await.unwrap();

    let all = storage.get_all_radar_charts().await.unwrap();
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[1].id, second.id);
}

#[tokio::test]
async fn delete_and_clear_remove_records() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir).await;
    let a = fixture_chart();
    let b = fixture_chart();
    storage.save_radar_chart(&a).await.unwrap();
    storage.save_radar_chart(&b).await.unwrap();

    storage.delete_radar_chart(a.id).await.unwrap();
    assert_eq!(storage.get_all_radar_charts().await.unwrap().len(), 1);

    // Deleting an absent id is not an error
    storage.delete_radar_chart(a.id).await.unwrap();

    storage.clear_all_radar_charts().await.unwrap();
    assert!(storage.get_all_radar_charts().await.unwrap().is_empty());
}

#[tokio::test]
async fn settings_round_trip_and_overwrite() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir).await;

    assert!(storage.get_app_settings("activeChartId").await.unwrap().is_none());

    storage.save_app_settings("activeChartId", "abc").await.unwrap();
    assert_eq!(
        storage.get_app_settings("activeChartId").await.unwrap(),
        Some("abc".to_string())
    );

    storage.save_app_settings("activeChartId", "def").await.unwrap();
    assert_eq!(
        storage.get_app_settings("activeChartId").await.unwrap(),
        Some("def".to_string())
    );

    storage.delete_app_settings("activeChartId").await.unwrap();
    assert!(storage.get_app_settings("activeChartId").await.unwrap().is_none());
}

#[tokio::test]
async fn reopening_the_database_preserves_records() {
    let dir = TempDir::new().unwrap();
    let chart = fixture_chart();

    {
        let storage = open_storage(&dir).await;
        storage.save_radar_chart(&chart).await.unwrap();
        storage.save_app_settings("activeChartId", &chart.id.to_string()).await.unwrap();
    }

    let storage = SqliteStorage::open(&dir.path().join("test.db"))
        .await
        .unwrap();
    assert_eq!(storage.get_radar_chart(chart.id).await.unwrap().unwrap(), chart);
    assert_eq!(
        storage.get_app_settings("activeChartId").await.unwrap(),
        Some(chart.id.to_string())
    );
}
