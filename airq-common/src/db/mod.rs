//! Read-only access to the readings store
//!
//! The dashboard never writes: every connection is opened with
//! `mode=ro` and the pool is shared by all request handlers.

pub mod models;
pub mod readings;

pub use models::Reading;
pub use readings::{
    latest_for_site, latest_per_site, list_sites, recent_sample_for_site, window_for_site,
    READINGS_TABLE,
};

use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::debug;

/// Open the readings database read-only
///
/// Fails with `Error::NotFound` when the file is missing; the dashboard has no
/// way to create or populate it.
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(Error::NotFound(format!(
            "Database not found: {}\nThe readings store must be populated before starting the dashboard.",
            db_path.display()
        )));
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await?;

    debug!("Opened {} read-only", db_path.display());

    Ok(pool)
}
