//! Direct classification endpoints
//!
//! Thin wrappers over the classification engine so a client can color its own
//! widgets without reimplementing the tables.

use airq_common::classify::{aqi_severity, classify_named, compute_aqi, AqiSeverity, Classification};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::extract::ApiQuery;
use crate::ApiResult;

#[derive(Debug, Deserialize)]
pub struct AqiQuery {
    pub pm25: f64,
}

#[derive(Debug, Serialize)]
pub struct AqiResponse {
    pub pm25: f64,
    pub aqi: u16,
    pub severity: AqiSeverity,
}

/// GET /api/aqi?pm25=
pub async fn get_aqi(ApiQuery(query): ApiQuery<AqiQuery>) -> ApiResult<Json<AqiResponse>> {
    let aqi = compute_aqi(query.pm25)?;
    Ok(Json(AqiResponse {
        pm25: query.pm25,
        aqi,
        severity: aqi_severity(aqi),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    pub pollutant: String,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub pollutant: String,
    pub value: f64,
    #[serde(flatten)]
    pub classification: Classification,
}

/// GET /api/classify?pollutant=&value=
///
/// Unrecognized pollutant names return the neutral "Unknown" classification.
pub async fn get_classification(
    ApiQuery(query): ApiQuery<ClassifyQuery>,
) -> ApiResult<Json<ClassifyResponse>> {
    let classification = classify_named(&query.pollutant, query.value)?;
    Ok(Json(ClassifyResponse {
        pollutant: query.pollutant,
        value: query.value,
        classification,
    }))
}
