//! Readings queries
//!
//! All queries select `*` so that optional pollutant columns absent from a
//! particular store simply decode as `None`.

use chrono::NaiveDateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, warn};

use super::models::Reading;
use crate::time::{parse_store_timestamp, TimeRange, STORE_TIMESTAMP_FORMAT};
use crate::Result;

/// Table holding one row per (site, datetime) measurement
pub const READINGS_TABLE: &str = "defra_uk_air_quality";

/// Distinct site names, sorted
pub async fn list_sites(pool: &SqlitePool) -> Result<Vec<String>> {
    let sites = sqlx::query_scalar::<_, String>(&format!(
        "SELECT DISTINCT site FROM {} WHERE site IS NOT NULL ORDER BY site",
        READINGS_TABLE
    ))
    .fetch_all(pool)
    .await?;

    debug!("Listed {} sites", sites.len());
    Ok(sites)
}

/// Latest reading for every site, ordered by site
///
/// Exactly one row per site; if two rows share a site's maximum timestamp the
/// first returned by the store is kept.
pub async fn latest_per_site(pool: &SqlitePool) -> Result<Vec<Reading>> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT * FROM {table}
        WHERE (site, datetime(datetime)) IN (
            SELECT site, MAX(datetime(datetime))
            FROM {table}
            GROUP BY site
        )
        ORDER BY site ASC
        "#,
        table = READINGS_TABLE
    ))
    .fetch_all(pool)
    .await?;

    let mut readings = decode_rows(&rows);
    readings.dedup_by(|a, b| a.site == b.site);

    debug!("Loaded latest readings for {} sites", readings.len());
    Ok(readings)
}

/// Latest reading for one site
pub async fn latest_for_site(pool: &SqlitePool, site: &str) -> Result<Option<Reading>> {
    let row = sqlx::query(&format!(
        "SELECT * FROM {} WHERE site = ? ORDER BY datetime(datetime) DESC LIMIT 1",
        READINGS_TABLE
    ))
    .bind(site)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().and_then(decode_reading))
}

/// Readings for one site within `range` of `now`, oldest first
///
/// Comparison goes through SQLite's `datetime()` so rows stored with either a
/// space or `T` separator are windowed correctly.
pub async fn window_for_site(
    pool: &SqlitePool,
    site: &str,
    range: TimeRange,
    now: NaiveDateTime,
) -> Result<Vec<Reading>> {
    let cutoff = range.cutoff(now).format(STORE_TIMESTAMP_FORMAT).to_string();

    let rows = sqlx::query(&format!(
        r#"
        SELECT * FROM {}
        WHERE site = ? AND datetime(datetime) >= datetime(?)
        ORDER BY datetime(datetime) ASC
        "#,
        READINGS_TABLE
    ))
    .bind(site)
    .bind(&cutoff)
    .fetch_all(pool)
    .await?;

    let readings = decode_rows(&rows);
    debug!(
        "Loaded {} readings for {} since {} ({})",
        readings.len(),
        site,
        cutoff,
        range.as_param()
    );
    Ok(readings)
}

/// Most recent `limit` readings for one site, oldest first
pub async fn recent_sample_for_site(
    pool: &SqlitePool,
    site: &str,
    limit: u32,
) -> Result<Vec<Reading>> {
    let rows = sqlx::query(&format!(
        "SELECT * FROM {} WHERE site = ? ORDER BY datetime(datetime) DESC LIMIT ?",
        READINGS_TABLE
    ))
    .bind(site)
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    let mut readings = decode_rows(&rows);
    readings.reverse();
    Ok(readings)
}

fn decode_rows(rows: &[SqliteRow]) -> Vec<Reading> {
    rows.iter().filter_map(decode_reading).collect()
}

/// Decode one row, skipping it (with a warning) if site or timestamp is unusable
fn decode_reading(row: &SqliteRow) -> Option<Reading> {
    let site = match row.try_get::<Option<String>, _>("site") {
        Ok(Some(site)) => site,
        Ok(None) => {
            warn!("Skipping reading with NULL site");
            return None;
        }
        Err(e) => {
            warn!("Skipping reading with unreadable site: {}", e);
            return None;
        }
    };

    let raw_timestamp = row.try_get::<Option<String>, _>("datetime").ok().flatten();
    let timestamp = match raw_timestamp.as_deref().and_then(parse_store_timestamp) {
        Some(ts) => ts,
        None => {
            warn!(
                "Skipping reading for {} with unparseable datetime {:?}",
                site, raw_timestamp
            );
            return None;
        }
    };

    Some(Reading {
        pm25: optional_f64(row, "pm25"),
        pm10: optional_f64(row, "pm10"),
        no2: optional_f64(row, "no2"),
        o3: optional_f64(row, "o3"),
        co: optional_f64(row, "co"),
        so2: optional_f64(row, "so2"),
        temperature: optional_f64(row, "temperature"),
        humidity: optional_f64(row, "humidity"),
        latitude: optional_f64(row, "latitude"),
        longitude: optional_f64(row, "longitude"),
        site,
        timestamp,
    })
}

/// Numeric column value; `None` for NULL, a missing column, or a non-numeric value
fn optional_f64(row: &SqliteRow, column: &str) -> Option<f64> {
    match row.try_get::<Option<f64>, _>(column) {
        Ok(value) => value,
        Err(sqlx::Error::ColumnNotFound(_)) => None,
        Err(_) => match row.try_get::<Option<i64>, _>(column) {
            Ok(value) => value.map(|v| v as f64),
            Err(e) => {
                warn!("Ignoring non-numeric {} value: {}", column, e);
                None
            }
        },
    }
}
