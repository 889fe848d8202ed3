//! End-to-end store + storage tests against the real backends

use std::sync::Arc;

use radar_common::model::{NewChart, NewDimension, NewVendor, ScoreMap, SymbolType};
use radar_common::scoring;
use radar_store::{ChartStorage, FileStorage, RadarStore, SqliteStorage, ACTIVE_CHART_KEY};
use tempfile::TempDir;

fn vendor_input(name: &str, order: i64) -> NewVendor {
    NewVendor {
        name: name.to_string(),
        color: "#3B82F6".to_string(),
        symbol: SymbolType::Circle,
        order,
    }
}

fn dimension_input(name: &str, weight: f64, order: i64) -> NewDimension {
    NewDimension {
        name: name.to_string(),
        description: None,
        weight,
        order,
        scores: ScoreMap::new(),
        sub_dimensions: Vec::new(),
    }
}

async fn build_and_score(store: &RadarStore) -> uuid::Uuid {
    let chart_id = store
        .add_chart(NewChart {
            name: "Showdown".to_string(),
            ..Default::default()
        })
        .await;
    let v1 = store.add_vendor(chart_id, vendor_input("Vendor 1", 0)).await.unwrap();
    let v2 = store.add_vendor(chart_id, vendor_input("Vendor 2", 1)).await.unwrap();
    let d1 = store
        .add_dimension(chart_id, dimension_input("Capability", 60.0, 0))
        .await
        .unwrap();
    let d2 = store
        .add_dimension(chart_id, dimension_input("Value", 40.0, 1))
        .await
        .unwrap();

    store.update_dimension_score(chart_id, d1, v1, 8.0).await;
    store.update_dimension_score(chart_id, d2, v1, 6.0).await;
    store.update_dimension_score(chart_id, d1, v2, 7.0).await;
    store.update_dimension_score(chart_id, d2, v2, 9.0).await;

    chart_id
}

#[tokio::test]
async fn scored_chart_produces_expected_rankings() {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path().join("charts.json")));
    let store = RadarStore::new(storage);
    let chart_id = build_and_score(&store).await;

    let chart = store.chart(chart_id).await.unwrap();
    let ranked = scoring::rankings(&chart.dimensions, &chart.vendors);

    assert_eq!(ranked[0].vendor.name, "Vendor 2");
    assert_eq!(ranked[0].score, 7.8);
    assert_eq!(ranked[0].rank, 1);
    assert_eq!(ranked[1].vendor.name, "Vendor 1");
    assert_eq!(ranked[1].score, 7.2);
    assert_eq!(ranked[1].rank, 2);
}

#[tokio::test]
async fn store_state_survives_a_sqlite_reload() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("radar-bench.db");

    let storage: Arc<dyn ChartStorage> = Arc::new(SqliteStorage::open(&db_path).await.unwrap());
    let store = RadarStore::new(storage);
    let chart_id = build_and_score(&store).await;
    store.set_active_chart(Some(chart_id)).await;
    store.save_to_storage().await.unwrap();
    let saved = store.chart(chart_id).await.unwrap();

    // Fresh store over the same database
    let storage: Arc<dyn ChartStorage> = Arc::new(SqliteStorage::open(&db_path).await.unwrap());
    let reloaded_store = RadarStore::new(storage);
    reloaded_store.load_from_storage().await;

    assert_eq!(reloaded_store.active_chart_id().await, Some(chart_id));
    let reloaded = reloaded_store.chart(chart_id).await.unwrap();
    assert_eq!(reloaded, saved);
}

#[tokio::test]
async fn store_state_survives_a_flat_file_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("radar-bench.json");

    let storage: Arc<dyn ChartStorage> = Arc::new(FileStorage::new(&path));
    let store = RadarStore::new(storage);
    let chart_id = build_and_score(&store).await;
    store.set_active_chart(Some(chart_id)).await;
    store.save_to_storage().await.unwrap();
    let saved = store.chart(chart_id).await.unwrap();

    let storage: Arc<dyn ChartStorage> = Arc::new(FileStorage::new(&path));
    let reloaded_store = RadarStore::new(storage);
    reloaded_store.load_from_storage().await;

    assert_eq!(reloaded_store.active_chart_id().await, Some(chart_id));
    assert_eq!(reloaded_store.chart(chart_id).await.unwrap(), saved);
}

#[tokio::test]
async fn first_run_against_sqlite_seeds_the_sample_chart() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("radar-bench.db");

    let storage = Arc::new(SqliteStorage::open(&db_path).await.unwrap());
    let store = RadarStore::new(storage.clone());
    store.load_from_storage().await;

    let charts = store.charts().await;
    assert_eq!(charts.len(), 1);
    assert_eq!(charts[0].name, "Sample Radar Chart");
    // Persisted, so a second load sees it as existing data
    assert_eq!(storage.get_all_radar_charts().await.unwrap().len(), 1);

    // The sample's composite dimension was re-derived on load
    let features = &charts[0].dimensions[0];
    assert!(!features.sub_dimensions.is_empty());
    for vendor in &charts[0].vendors {
        let derived = scoring::calculate_parent_score(&features.sub_dimensions, vendor.id);
        assert_eq!(features.scores[&vendor.id], derived);
    }
}

#[tokio::test]
async fn save_after_delete_does_not_resurrect_charts() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("radar-bench.db");

    let storage: Arc<dyn ChartStorage> = Arc::new(SqliteStorage::open(&db_path).await.unwrap());
    let store = RadarStore::new(storage.clone());
    let keep = store.add_chart(NewChart::default()).await;
    let remove = store.add_chart(NewChart::default()).await;
    store.save_to_storage().await.unwrap();

    store.delete_chart(remove).await;
    store.save_to_storage().await.unwrap();

    let stored = storage.get_all_radar_charts().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, keep);

    // The setting key is written with the active chart on save
    store.set_active_chart(Some(keep)).await;
    store.save_to_storage().await.unwrap();
    assert_eq!(
        storage.get_app_settings(ACTIVE_CHART_KEY).await.unwrap(),
        Some(keep.to_string())
    );
}
