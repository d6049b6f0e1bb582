//! Pollutant detail page handler

use airq_common::{db, PollutantKind};
use axum::{extract::State, response::Html};
use serde::Deserialize;

use super::{cards, layout};
use crate::extract::{ApiPath, ApiQuery};
use crate::{ApiError, ApiResult, AppState};

/// Most recent readings loaded for the detail statistics
const SAMPLE_SIZE: u32 = 1500;

#[derive(Debug, Deserialize)]
pub struct PollutantQuery {
    pub site: Option<String>,
}

/// GET /pollutant/:kind?site=
///
/// `kind` accepts column or display names (`pm25`, `PM2.5`). Defaults to the
/// first site when `site` is absent.
pub async fn pollutant_page(
    State(state): State<AppState>,
    ApiPath(kind): ApiPath<String>,
    ApiQuery(query): ApiQuery<PollutantQuery>,
) -> ApiResult<Html<String>> {
    let kind = PollutantKind::from_name(&kind)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown pollutant: {}", kind)))?;

    let site = match query.site.filter(|s| !s.is_empty()) {
        Some(site) => site,
        None => db::list_sites(&state.db)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound("No monitoring sites found".to_string()))?,
    };

    let sample = db::recent_sample_for_site(&state.db, &site, SAMPLE_SIZE).await?;
    if sample.is_empty() {
        return Err(ApiError::NotFound(format!("Unknown site: {}", site)));
    }

    let body = cards::pollutant_detail(kind, &site, &sample);
    let title = format!("{} - {}", kind.display_name(), site);
    Ok(Html(layout::page(&title, &body)))
}
