//! Site data endpoints
//!
//! Latest readings, per-site history windows and map markers as JSON.

use airq_common::db;
use airq_common::TimeRange;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::extract::{ApiPath, ApiQuery};
use crate::summary::{history_points, map_view, HistoryPoint, MapView, SiteSummary};
use crate::{ApiError, ApiResult, AppState};

/// GET /api/sites
pub async fn get_sites(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(db::list_sites(&state.db).await?))
}

/// GET /api/latest
///
/// Latest reading per site with its AQI and severity.
pub async fn get_latest(State(state): State<AppState>) -> ApiResult<Json<Vec<SiteSummary>>> {
    let summaries = db::latest_per_site(&state.db)
        .await?
        .into_iter()
        .map(SiteSummary::from_reading)
        .collect();
    Ok(Json(summaries))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// `24h`, `7d` or `30d`; defaults to `24h`
    pub range: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub site: String,
    pub range: &'static str,
    pub points: Vec<HistoryPoint>,
}

/// Parse an optional range parameter, defaulting to the last 24 hours
pub fn parse_range(param: Option<&str>) -> ApiResult<TimeRange> {
    match param {
        None | Some("") => Ok(TimeRange::default()),
        Some(s) => TimeRange::from_param(s).ok_or_else(|| {
            ApiError::BadRequest(format!("Invalid range '{}': expected 24h, 7d or 30d", s))
        }),
    }
}

/// GET /api/sites/:site/history?range=
pub async fn get_site_history(
    State(state): State<AppState>,
    ApiPath(site): ApiPath<String>,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> ApiResult<Json<HistoryResponse>> {
    let range = parse_range(query.range.as_deref())?;

    if db::latest_for_site(&state.db, &site).await?.is_none() {
        return Err(ApiError::NotFound(format!("Unknown site: {}", site)));
    }

    let readings = db::window_for_site(&state.db, &site, range, airq_common::time::now()).await?;

    Ok(Json(HistoryResponse {
        site,
        range: range.as_param(),
        points: history_points(&readings),
    }))
}

#[derive(Debug, Deserialize)]
pub struct MapQuery {
    pub site: Option<String>,
}

/// GET /api/map?site=
pub async fn get_map(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MapQuery>,
) -> ApiResult<Json<MapView>> {
    let summaries: Vec<SiteSummary> = db::latest_per_site(&state.db)
        .await?
        .into_iter()
        .map(SiteSummary::from_reading)
        .collect();
    Ok(Json(map_view(&summaries, query.site.as_deref())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range(None).unwrap(), TimeRange::Last24Hours);
        assert_eq!(parse_range(Some("")).unwrap(), TimeRange::Last24Hours);
        assert_eq!(parse_range(Some("7d")).unwrap(), TimeRange::Last7Days);
        assert!(matches!(parse_range(Some("2w")), Err(ApiError::BadRequest(_))));
    }
}
