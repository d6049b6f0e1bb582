//! Scratch readings store for router tests

use airq_common::time::{now, STORE_TIMESTAMP_FORMAT};
use chrono::{Duration, NaiveDateTime};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Read-only pool over a populated temporary store
///
/// The directory is removed when this is dropped.
pub struct TestStore {
    pub pool: SqlitePool,
    _dir: TempDir,
}

pub fn hours_ago(hours: i64) -> NaiveDateTime {
    now() - Duration::hours(hours)
}

/// Build a store with three sites, timestamps relative to now
///
/// - London: 30 days ago pm25 80, 3 days ago 10, 1 hour ago 40 (latest)
/// - Leeds: 2 hours ago pm25 5, no coordinates
/// - York: 1 hour ago, PM2.5 missing
pub async fn create_test_store() -> TestStore {
    let dir = TempDir::new().expect("Should create temp dir");
    let db_path = dir.path().join("air_quality.sqlite");

    let url = format!("sqlite:{}?mode=rwc", db_path.display());
    let writer = SqlitePool::connect(&url).await.expect("Should create store");

    sqlx::query(
        "CREATE TABLE defra_uk_air_quality (
            site TEXT, datetime TEXT,
            pm25 REAL, pm10 REAL, no2 REAL, o3 REAL, co REAL, so2 REAL,
            temperature REAL, humidity REAL, latitude REAL, longitude REAL
        )",
    )
    .execute(&writer)
    .await
    .expect("Should create table");

    let rows: [(&str, i64, Option<f64>, Option<(f64, f64)>); 6] = [
        ("London", 24 * 30 + 1, Some(80.0), Some((51.5, -0.12))),
        ("London", 24 * 3, Some(10.0), Some((51.5, -0.12))),
        ("London", 1, Some(40.0), Some((51.5, -0.12))),
        ("Leeds", 2, Some(5.0), None),
        ("York", 5, Some(12.0), Some((53.96, -1.08))),
        ("York", 1, None, Some((53.96, -1.08))),
    ];
    for (site, age_hours, pm25, position) in rows {
        sqlx::query(
            "INSERT INTO defra_uk_air_quality
             (site, datetime, pm25, pm10, no2, o3, co, so2, temperature, humidity, latitude, longitude)
             VALUES (?, ?, ?, 20, 30, 40, NULL, NULL, 11.5, 70, ?, ?)",
        )
        .bind(site)
        .bind(hours_ago(age_hours).format(STORE_TIMESTAMP_FORMAT).to_string())
        .bind(pm25)
        .bind(position.map(|p| p.0))
        .bind(position.map(|p| p.1))
        .execute(&writer)
        .await
        .expect("Should insert reading");
    }
    writer.close().await;

    let pool = airq_common::db::connect_readonly(&db_path)
        .await
        .expect("Should open store read-only");

    TestStore { pool, _dir: dir }
}
