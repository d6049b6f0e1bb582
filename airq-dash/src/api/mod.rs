//! HTTP API handlers for airq-dash

pub mod buildinfo;
pub mod classify;
pub mod health;
pub mod sites;

use axum::{routing::get, Router};

use crate::AppState;

pub use buildinfo::get_build_info;
pub use classify::{get_aqi, get_classification};
pub use health::health_routes;
pub use sites::{get_latest, get_map, get_site_history, get_sites};

/// JSON data routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/buildinfo", get(get_build_info))
        .route("/api/sites", get(get_sites))
        .route("/api/sites/:site/history", get(get_site_history))
        .route("/api/latest", get(get_latest))
        .route("/api/map", get(get_map))
        .route("/api/aqi", get(get_aqi))
        .route("/api/classify", get(get_classification))
}
