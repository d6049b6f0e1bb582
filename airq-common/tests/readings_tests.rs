//! Readings store queries against a scratch SQLite database

use airq_common::db::{
    connect_readonly, latest_for_site, latest_per_site, list_sites, recent_sample_for_site,
    window_for_site,
};
use airq_common::{Error, PollutantKind, TimeRange};
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Create a populated store, returning its path (TempDir must stay alive)
async fn create_store(dir: &TempDir, with_co_so2: bool) -> PathBuf {
    let db_path = dir.path().join("air_quality.sqlite");
    let url = format!("sqlite:{}?mode=rwc", db_path.display());
    let pool = SqlitePool::connect(&url).await.unwrap();

    let extra_columns = if with_co_so2 { ", co REAL, so2 REAL" } else { "" };
    sqlx::query(&format!(
        "CREATE TABLE defra_uk_air_quality (
            site TEXT, datetime TEXT,
            pm25 REAL, pm10 REAL, no2 REAL, o3 REAL{},
            temperature REAL, humidity REAL, latitude REAL, longitude REAL
        )",
        extra_columns
    ))
    .execute(&pool)
    .await
    .unwrap();

    let rows = [
        ("London", "2025-03-30 10:00:00", Some(10.0)),
        ("London", "2025-03-31 09:00:00", Some(40.0)),
        ("London", "2025-03-31T11:00:00", Some(20.0)),
        ("Leeds", "2025-03-20 08:00:00", Some(5.0)),
        ("Leeds", "2025-03-31 08:00:00", None),
        ("Bath", "2025-03-01 00:00:00", Some(70.0)),
    ];
    for (site, datetime, pm25) in rows {
        sqlx::query(
            "INSERT INTO defra_uk_air_quality
             (site, datetime, pm25, pm10, no2, o3, temperature, humidity, latitude, longitude)
             VALUES (?, ?, ?, 30, 20, 40, 12.5, 80, 51.5, -0.1)",
        )
        .bind(site)
        .bind(datetime)
        .bind(pm25)
        .execute(&pool)
        .await
        .unwrap();
    }

    pool.close().await;
    db_path
}

async fn open(path: &Path) -> SqlitePool {
    connect_readonly(path).await.expect("should open read-only")
}

#[tokio::test]
async fn test_missing_database_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = connect_readonly(&dir.path().join("nope.sqlite")).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_connection_rejects_writes() {
    let dir = TempDir::new().unwrap();
    let pool = open(&create_store(&dir, true).await).await;

    let result = sqlx::query("DELETE FROM defra_uk_air_quality").execute(&pool).await;
    assert!(result.is_err(), "write should fail on read-only pool");
}

#[tokio::test]
async fn test_read_only_pool_leaves_schema_untouched() {
    let dir = TempDir::new().unwrap();
    let path = create_store(&dir, true).await;
    let pool = open(&path).await;

    let create = sqlx::query("CREATE TABLE scratch (id INTEGER)").execute(&pool).await;
    assert!(create.is_err(), "DDL should fail on read-only pool");
    pool.close().await;

    // Reopen read-write and confirm only the readings table exists
    let url = format!("sqlite:{}?mode=rw", path.display());
    let inspect = SqlitePool::connect(&url).await.unwrap();
    let tables: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(&inspect)
            .await
            .unwrap();
    assert_eq!(tables, vec!["defra_uk_air_quality"]);
    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM defra_uk_air_quality")
        .fetch_one(&inspect)
        .await
        .unwrap();
    assert_eq!(rows, 6);
}

#[tokio::test]
async fn test_list_sites_sorted() {
    let dir = TempDir::new().unwrap();
    let pool = open(&create_store(&dir, true).await).await;

    assert_eq!(list_sites(&pool).await.unwrap(), vec!["Bath", "Leeds", "London"]);
}

#[tokio::test]
async fn test_latest_per_site_one_row_each() {
    let dir = TempDir::new().unwrap();
    let pool = open(&create_store(&dir, true).await).await;

    let latest = latest_per_site(&pool).await.unwrap();
    let sites: Vec<_> = latest.iter().map(|r| r.site.as_str()).collect();
    assert_eq!(sites, vec!["Bath", "Leeds", "London"]);

    let london = latest.iter().find(|r| r.site == "London").unwrap();
    assert_eq!(london.timestamp, at(31, 11));
    assert_eq!(london.pm25, Some(20.0));

    // Latest Leeds row has no PM2.5: absent, not defaulted
    let leeds = latest.iter().find(|r| r.site == "Leeds").unwrap();
    assert_eq!(leeds.pm25, None);
    assert_eq!(leeds.aqi().unwrap(), None);
}

#[tokio::test]
async fn test_null_co_so2_are_none() {
    let dir = TempDir::new().unwrap();
    let pool = open(&create_store(&dir, true).await).await;

    let reading = latest_for_site(&pool, "Bath").await.unwrap().unwrap();
    assert_eq!(reading.concentration(PollutantKind::Co), None);
    assert_eq!(reading.concentration(PollutantKind::So2), None);
    assert_eq!(reading.concentration(PollutantKind::No2), Some(20.0));
}

#[tokio::test]
async fn test_absent_columns_are_none() {
    let dir = TempDir::new().unwrap();
    let pool = open(&create_store(&dir, false).await).await;

    let reading = latest_for_site(&pool, "Bath").await.unwrap().unwrap();
    assert_eq!(reading.co, None);
    assert_eq!(reading.so2, None);
    assert_eq!(reading.pm25, Some(70.0));
    assert_eq!(reading.position(), Some((51.5, -0.1)));
}

#[tokio::test]
async fn test_latest_for_unknown_site() {
    let dir = TempDir::new().unwrap();
    let pool = open(&create_store(&dir, true).await).await;

    assert!(latest_for_site(&pool, "Atlantis").await.unwrap().is_none());
}

#[tokio::test]
async fn test_window_respects_cutoff_and_order() {
    let dir = TempDir::new().unwrap();
    let pool = open(&create_store(&dir, true).await).await;
    let now = at(31, 12);

    let day = window_for_site(&pool, "London", TimeRange::Last24Hours, now).await.unwrap();
    let stamps: Vec<_> = day.iter().map(|r| r.timestamp).collect();
    assert_eq!(stamps, vec![at(31, 9), at(31, 11)]);

    let week = window_for_site(&pool, "London", TimeRange::Last7Days, now).await.unwrap();
    let stamps: Vec<_> = week.iter().map(|r| r.timestamp).collect();
    assert_eq!(stamps, vec![at(30, 10), at(31, 9), at(31, 11)]);
}

#[tokio::test]
async fn test_window_includes_exact_cutoff() {
    let dir = TempDir::new().unwrap();
    let pool = open(&create_store(&dir, true).await).await;

    // Bath's only row sits exactly 30 days before now
    let month = window_for_site(&pool, "Bath", TimeRange::Last30Days, at(31, 0)).await.unwrap();
    assert_eq!(month.len(), 1);

    let week = window_for_site(&pool, "Bath", TimeRange::Last7Days, at(31, 0)).await.unwrap();
    assert!(week.is_empty());
}

#[tokio::test]
async fn test_recent_sample_is_ascending() {
    let dir = TempDir::new().unwrap();
    let pool = open(&create_store(&dir, true).await).await;

    let sample = recent_sample_for_site(&pool, "London", 2).await.unwrap();
    let stamps: Vec<_> = sample.iter().map(|r| r.timestamp).collect();
    assert_eq!(stamps, vec![at(31, 9), at(31, 11)]);
}
