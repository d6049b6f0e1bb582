//! Dashboard page handler

use airq_common::db;
use axum::{
    extract::State,
    response::Html,
};
use serde::Deserialize;
use tracing::debug;

use super::{cards, layout};
use crate::api::sites::parse_range;
use crate::extract::ApiQuery;
use crate::summary::{history_points, map_view, most_polluted, recent_history, SiteSummary};
use crate::{ApiError, ApiResult, AppState};

/// Rows in the most-polluted table
const RANKING_LIMIT: usize = 10;
/// Readings loaded for the historical AQI bars
const HISTORY_SAMPLE: u32 = 1000;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub site: Option<String>,
    pub range: Option<String>,
}

/// GET /?site=&range=
///
/// Without `site` the first site in name order is shown. An explicit site
/// that has no readings is a 404.
pub async fn dashboard_page(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> ApiResult<Html<String>> {
    let range = parse_range(query.range.as_deref())?;
    let sites = db::list_sites(&state.db).await?;

    let summaries: Vec<SiteSummary> = db::latest_per_site(&state.db)
        .await?
        .into_iter()
        .map(SiteSummary::from_reading)
        .collect();

    let selected = match query.site.as_deref().filter(|s| !s.is_empty()) {
        Some(site) => {
            if !sites.iter().any(|s| s == site) {
                return Err(ApiError::NotFound(format!("Unknown site: {}", site)));
            }
            Some(site.to_string())
        }
        None => sites.first().cloned(),
    };
    debug!("Rendering dashboard for {:?} over {}", selected, range);

    let mut body = cards::controls(&sites, selected.as_deref(), range);
    // The map zooms in only on an explicitly chosen site
    body.push_str(&cards::map_panel(&map_view(&summaries, query.site.as_deref())));

    match selected.as_deref() {
        Some(site) => {
            let summary = summaries.iter().find(|s| s.site() == site);
            body.push_str(&cards::aqi_card(summary));
            if let Some(summary) = summary {
                body.push_str(&cards::pollutant_cards(&summary.reading));
                body.push_str(&cards::pollutants_chart(&summary.reading));
            }

            let sample = db::recent_sample_for_site(&state.db, site, HISTORY_SAMPLE).await?;
            body.push_str(&cards::history_bars(site, &recent_history(&sample)));

            let window =
                db::window_for_site(&state.db, site, range, airq_common::time::now()).await?;
            body.push_str(&cards::trend_chart(site, range, &history_points(&window)));
        }
        None => body.push_str(r#"<div class="card"><p class="muted">No monitoring sites found</p></div>"#),
    }

    body.push_str(&cards::aqi_index());
    body.push_str(&cards::city_cards(&summaries));
    body.push_str(&cards::ranking_table(&most_polluted(&summaries, RANKING_LIMIT)));

    let title = match selected.as_deref() {
        Some(site) => format!("Air Quality - {}", site),
        None => "Air Quality".to_string(),
    };
    Ok(Html(layout::page(&title, &body)))
}
