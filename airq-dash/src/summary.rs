//! Per-site views derived from readings
//!
//! These are the shapes the pages and JSON endpoints render: a reading paired
//! with its AQI, the most-polluted ranking, map markers and series statistics.

use airq_common::classify::{aqi_severity, AqiSeverity, Classification};
use airq_common::db::Reading;
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use tracing::warn;

/// Default map view over the UK
pub const UK_CENTER: (f64, f64) = (54.5, -3.0);
pub const UK_ZOOM: f64 = 5.5;
/// Map zoom when a site is selected
pub const SITE_ZOOM: f64 = 11.0;

/// AQI "standard" used for the ranking multiplier
const AQI_STANDARD: u16 = 50;

/// Latest reading for one site with its AQI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSummary {
    #[serde(flatten)]
    pub reading: Reading,
    pub aqi: Option<u16>,
    pub severity: Option<AqiSeverity>,
}

impl SiteSummary {
    /// Pair a reading with its AQI
    ///
    /// An invalid PM2.5 (negative, say) is logged and treated as missing.
    pub fn from_reading(reading: Reading) -> Self {
        let aqi = aqi_or_warn(&reading);
        Self {
            severity: aqi.map(aqi_severity),
            aqi,
            reading,
        }
    }

    pub fn site(&self) -> &str {
        &self.reading.site
    }

    /// Marker color, neutral gray without an AQI
    pub fn marker_color(&self) -> &'static str {
        self.severity
            .map(|s| s.marker_color)
            .unwrap_or(Classification::UNKNOWN.marker_color)
    }
}

fn aqi_or_warn(reading: &Reading) -> Option<u16> {
    match reading.aqi() {
        Ok(aqi) => aqi,
        Err(e) => {
            warn!("Ignoring PM2.5 for {} at {}: {}", reading.site, reading.timestamp, e);
            None
        }
    }
}

/// One row of the most-polluted ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry {
    pub rank: usize,
    pub site: String,
    pub aqi: u16,
    pub status: &'static str,
    pub marker_color: &'static str,
    pub background_color: &'static str,
    /// How many times the AQI exceeds the standard of 50, at least 1
    pub standard_multiplier: u16,
}

/// Sites ordered by AQI, highest first, at most `limit` entries
///
/// Sites without an AQI are left out. Ties keep the input order.
pub fn most_polluted(summaries: &[SiteSummary], limit: usize) -> Vec<RankEntry> {
    let mut ranked: Vec<(&SiteSummary, u16)> = summaries
        .iter()
        .filter_map(|s| s.aqi.map(|aqi| (s, aqi)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (summary, aqi))| {
            let severity = aqi_severity(aqi);
            RankEntry {
                rank: i + 1,
                site: summary.reading.site.clone(),
                aqi,
                status: severity.label,
                marker_color: severity.marker_color,
                background_color: severity.background_color,
                standard_multiplier: (aqi / AQI_STANDARD).max(1),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub site: String,
    pub latitude: f64,
    pub longitude: f64,
    pub pm25: Option<f64>,
    pub aqi: Option<u16>,
    pub color: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: f64,
    pub markers: Vec<MapMarker>,
}

/// Map markers for every positioned site
///
/// Centers on `selected` when it names a site with coordinates, otherwise on
/// the UK overview.
pub fn map_view(summaries: &[SiteSummary], selected: Option<&str>) -> MapView {
    let markers: Vec<MapMarker> = summaries
        .iter()
        .filter_map(|s| {
            let (latitude, longitude) = s.reading.position()?;
            Some(MapMarker {
                site: s.reading.site.clone(),
                latitude,
                longitude,
                pm25: s.reading.pm25,
                aqi: s.aqi,
                color: s.marker_color(),
                selected: selected == Some(s.site()),
            })
        })
        .collect();

    let (center_lat, center_lon, zoom) = markers
        .iter()
        .find(|m| m.selected)
        .map(|m| (m.latitude, m.longitude, SITE_ZOOM))
        .unwrap_or((UK_CENTER.0, UK_CENTER.1, UK_ZOOM));

    MapView {
        center_lat,
        center_lon,
        zoom,
        markers,
    }
}

/// Web-mercator tile size in pixels at zoom 0
const TILE_SIZE: f64 = 256.0;

fn mercator_y(latitude: f64) -> f64 {
    let phi = latitude.to_radians();
    (std::f64::consts::FRAC_PI_4 + phi / 2.0).tan().ln()
}

impl MapView {
    /// Pixel position of a coordinate in a `width` x `height` viewport
    ///
    /// Web-mercator scaling at this view's zoom, with the center in the middle
    /// of the viewport. Points off-screen come back outside `0..width` /
    /// `0..height`.
    pub fn project(&self, latitude: f64, longitude: f64, width: f64, height: f64) -> (f64, f64) {
        let pixels_per_radian = TILE_SIZE * 2f64.powf(self.zoom) / (2.0 * std::f64::consts::PI);
        let x = width / 2.0 + (longitude - self.center_lon).to_radians() * pixels_per_radian;
        let y = height / 2.0
            - (mercator_y(latitude) - mercator_y(self.center_lat)) * pixels_per_radian;
        (x, y)
    }
}

/// Point on the AQI trend chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub timestamp: NaiveDateTime,
    pub aqi: Option<u16>,
    pub pm25: Option<f64>,
}

pub fn history_points(readings: &[Reading]) -> Vec<HistoryPoint> {
    readings
        .iter()
        .map(|r| HistoryPoint {
            timestamp: r.timestamp,
            aqi: aqi_or_warn(r),
            pm25: r.pm25,
        })
        .collect()
}

/// Hours of history shown before the site's latest reading
const RECENT_HISTORY_HOURS: i64 = 24;
/// Fewer points than this in the window falls back to the tail
const RECENT_HISTORY_MIN_POINTS: usize = 5;
const RECENT_HISTORY_FALLBACK_POINTS: usize = 20;

/// History anchored on the latest reading rather than the wall clock
///
/// `sample` must be in ascending time order. Keeps the 24 hours up to the
/// newest reading; when that window holds fewer than 5 readings the last 20
/// are used instead.
pub fn recent_history(sample: &[Reading]) -> Vec<HistoryPoint> {
    let Some(latest) = sample.last().map(|r| r.timestamp) else {
        return Vec::new();
    };
    let cutoff = latest - Duration::hours(RECENT_HISTORY_HOURS);
    let start = sample.partition_point(|r| r.timestamp < cutoff);

    let window = if sample.len() - start < RECENT_HISTORY_MIN_POINTS {
        &sample[sample.len().saturating_sub(RECENT_HISTORY_FALLBACK_POINTS)..]
    } else {
        &sample[start..]
    };
    history_points(window)
}

/// Min / max / mean of a measured series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub count: usize,
}

impl SeriesStats {
    /// `None` for an empty series
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let average = values.iter().sum::<f64>() / values.len() as f64;
        Some(Self {
            min,
            max,
            average,
            count: values.len(),
        })
    }
}

/// Bar heights as a percentage of the series maximum, kept within 5..=100
pub fn relative_heights(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0, f64::max);
    values
        .iter()
        .map(|v| {
            if max > 0.0 {
                (v / max * 100.0).clamp(5.0, 100.0)
            } else {
                5.0
            }
        })
        .collect()
}
