//! UI routes - HTML pages for the air quality dashboard
//!
//! # Structure
//! - **Layout** (`layout`): document skeleton, shared CSS, escaping
//! - **Cards** (`cards`): AQI card, pollutant cards, legend, city cards,
//!   ranking table, trend chart and pollutant detail
//! - **Dashboard** (`dashboard`): `/` page for one site and time range
//! - **Pollutant** (`pollutant`): `/pollutant/:kind` detail page

use axum::{routing::get, Router};

use crate::AppState;

pub mod cards;
pub mod layout;

mod dashboard;
mod pollutant;

use dashboard::dashboard_page;
use pollutant::pollutant_page;

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/pollutant/:kind", get(pollutant_page))
}
