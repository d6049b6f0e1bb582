//! Dashboard fragments
//!
//! Each function renders one self-contained block of HTML from already-loaded
//! data. None of them touch the database.

use airq_common::classify::{
    classify_pollutant, AqiCategory, Classification, PollutantCategory, PollutantKind,
};
use airq_common::db::Reading;
use airq_common::TimeRange;
use tracing::warn;

use super::layout::{encode_query_value, escape_html};
use crate::summary::{
    relative_heights, HistoryPoint, MapView, RankEntry, SeriesStats, SiteSummary,
};

/// Shown wherever a measurement is absent
pub const NO_DATA: &str = "No data";

fn format_value(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.1} {}", v, unit),
        None => NO_DATA.to_string(),
    }
}

/// Classification for an optional value; missing or invalid values are gray
fn classify_or_unknown(kind: PollutantKind, value: Option<f64>) -> Classification {
    match value.map(|v| classify_pollutant(kind, v)) {
        Some(Ok(classification)) => classification,
        Some(Err(e)) => {
            warn!("Not classifying {} value: {}", kind, e);
            Classification::UNKNOWN
        }
        None => Classification::UNKNOWN,
    }
}

/// Site and time range pickers, submitted as query parameters
pub fn controls(sites: &[String], selected: Option<&str>, range: TimeRange) -> String {
    let site_options: String = sites
        .iter()
        .map(|site| {
            format!(
                r#"<option value="{v}"{sel}>{v}</option>"#,
                v = escape_html(site),
                sel = if selected == Some(site.as_str()) { " selected" } else { "" },
            )
        })
        .collect();

    let range_options: String = TimeRange::all_variants()
        .iter()
        .map(|r| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                r.as_param(),
                if *r == range { " selected" } else { "" },
                r.display_name()
            )
        })
        .collect();

    format!(
        r#"<form class="controls" method="get" action="/">
    <label>Select City <select name="site">{}</select></label>
    <label>Time Range <select name="range">{}</select></label>
    <button type="submit">Show</button>
</form>"#,
        site_options, range_options
    )
}

fn scale_bar() -> String {
    let colors: String = PollutantCategory::all_variants()
        .iter()
        .map(|c| format!(r#"<div style="background: {};"></div>"#, c.marker_color()))
        .collect();
    let labels: String = PollutantCategory::all_variants()
        .iter()
        .map(|c| format!("<span>{}</span>", c.label()))
        .collect();
    format!(
        r#"<div class="scale-bar">{}</div><div class="scale-labels">{}</div>"#,
        colors, labels
    )
}

/// Temperature and humidity, omitted when neither was recorded
fn weather_box(reading: &Reading) -> String {
    if reading.temperature.is_none() && reading.humidity.is_none() {
        return String::new();
    }
    format!(
        r#"<div class="weather">
            <div><strong>{}</strong></div>
            <div class="muted">Humidity: {}</div>
        </div>"#,
        format_value(reading.temperature, "°C"),
        format_value(reading.humidity, "%"),
    )
}

/// Headline AQI card for the selected site
pub fn aqi_card(summary: Option<&SiteSummary>) -> String {
    let Some(summary) = summary else {
        return r#"<div class="card"><p class="muted">City data not available</p></div>"#
            .to_string();
    };
    let reading = &summary.reading;
    let last_updated = reading.timestamp.format("%d %b %H:%M");

    let (aqi_text, status, color) = match (summary.aqi, summary.severity) {
        (Some(aqi), Some(severity)) => (
            aqi.to_string(),
            format!("{} {}", severity.label, severity.icon),
            severity.marker_color,
        ),
        _ => ("--".to_string(), NO_DATA.to_string(), Classification::UNKNOWN.marker_color),
    };

    format!(
        r#"<div class="card aqi-card">
    <h2>Real-time Air Quality Data</h2>
    <p class="muted">{site}, United Kingdom • Last Updated: {updated}</p>
    <div class="aqi-main">
        <div>
            <div class="muted">Live AQI</div>
            <div class="aqi-value" style="color: {color};">{aqi}</div>
            <div>Air Quality is</div>
            <div class="aqi-status" style="color: {color};">{status}</div>
        </div>
        <div>
            <div class="muted">PM10</div>
            <div><strong>{pm10}</strong></div>
        </div>
        <div>
            <div class="muted">PM2.5</div>
            <div><strong>{pm25}</strong></div>
        </div>
        {weather}
    </div>
    {scale}
</div>"#,
        site = escape_html(&reading.site),
        updated = last_updated,
        color = color,
        aqi = aqi_text,
        status = status,
        pm10 = format_value(reading.pm10, PollutantKind::Pm10.unit()),
        pm25 = format_value(reading.pm25, PollutantKind::Pm25.unit()),
        weather = weather_box(reading),
        scale = scale_bar(),
    )
}

/// One card per pollutant for a site's latest reading
pub fn pollutant_cards(reading: &Reading) -> String {
    let cards: String = PollutantKind::all_variants()
        .iter()
        .map(|kind| {
            let value = reading.concentration(*kind);
            let classification = classify_or_unknown(*kind, value);
            let label = if value.is_some() { classification.label } else { NO_DATA };
            format!(
                r#"<a class="pollutant-card" href="/pollutant/{param}?site={site}" style="background: {bg}; border-color: {marker};">
    <div class="muted">{icon} {name}</div>
    <div class="value">{value}</div>
    <div style="color: {marker}; font-weight: 600;">{label}</div>
</a>"#,
                param = kind.column_name(),
                site = encode_query_value(&reading.site),
                bg = classification.background_color,
                marker = classification.marker_color,
                icon = kind.info().icon,
                name = kind.display_name(),
                value = format_value(value, kind.unit()),
                label = label,
            )
        })
        .collect();

    format!(
        r#"<div class="card"><h2>Major Air Pollutants</h2><div class="grid">{}</div></div>"#,
        cards
    )
}

/// Legend of the six AQI bands
pub fn aqi_index() -> String {
    let rows: String = AqiCategory::all_variants()
        .iter()
        .map(|c| {
            let (lo, hi) = c.aqi_range();
            let range = if *c == AqiCategory::Hazardous {
                format!("{}+", lo)
            } else {
                format!("{}-{}", lo, hi)
            };
            format!(
                r#"<div class="legend-row"><div class="swatch" style="background: {};"></div><strong>{}</strong><span class="muted">{}</span></div>"#,
                c.marker_color(),
                range,
                c.label()
            )
        })
        .collect();

    format!(r#"<div class="card"><h2>AQI Index</h2>{}</div>"#, rows)
}

/// Card per site with AQI and weather
pub fn city_cards(summaries: &[SiteSummary]) -> String {
    let cards: String = summaries
        .iter()
        .map(|s| {
            let (aqi, label, bg) = match (s.aqi, s.severity) {
                (Some(aqi), Some(sev)) => (aqi.to_string(), sev.label, sev.background_color),
                _ => ("--".to_string(), NO_DATA, Classification::UNKNOWN.background_color),
            };
            let mut weather = String::new();
            if let Some(t) = s.reading.temperature {
                weather.push_str(&format!("{:.1}°C ", t));
            }
            if let Some(h) = s.reading.humidity {
                weather.push_str(&format!("💧 {:.1}%", h));
            }
            format!(
                r#"<a class="city-card" href="/?site={q}" style="background: {bg}; border-color: {marker};">
    <div><strong>{site}</strong></div>
    <div class="value" style="color: {marker};">{aqi}</div>
    <div>{label}</div>
    <div class="muted">{weather}</div>
</a>"#,
                q = encode_query_value(s.site()),
                bg = bg,
                marker = s.marker_color(),
                site = escape_html(s.site()),
                aqi = aqi,
                label = label,
                weather = weather.trim_end(),
            )
        })
        .collect();

    format!(
        r#"<div class="card"><h2>Air Quality Across UK Cities</h2><div class="grid">{}</div></div>"#,
        cards
    )
}

/// Most-polluted ranking table
pub fn ranking_table(entries: &[RankEntry]) -> String {
    let rows: String = entries
        .iter()
        .map(|e| {
            format!(
                r#"<tr><td>{rank}</td><td>{site}</td><td><span class="badge" style="background: {bg}; color: {marker};">{aqi}</span></td><td>{status}</td><td>{mult}x above standard</td></tr>"#,
                rank = e.rank,
                site = escape_html(&e.site),
                bg = e.background_color,
                marker = e.marker_color,
                aqi = e.aqi,
                status = e.status,
                mult = e.standard_multiplier,
            )
        })
        .collect();

    format!(
        r#"<div class="card">
    <h2>Most Polluted Cities</h2>
    <p class="muted">Real-time most air polluted cities in the country</p>
    <table class="ranking">
        <thead><tr><th>Rank</th><th>City</th><th>AQI</th><th>Status</th><th>Standard</th></tr></thead>
        <tbody>{}</tbody>
    </table>
</div>"#,
        rows
    )
}

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 200.0;

/// AQI trend for a site as an inline SVG polyline
pub fn trend_chart(site: &str, range: TimeRange, points: &[HistoryPoint]) -> String {
    let values: Vec<(usize, u16)> = points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.aqi.map(|aqi| (i, aqi)))
        .collect();

    let title = format!("AQI Trend - {} ({})", escape_html(site), range.display_name());
    if values.is_empty() {
        return format!(
            r#"<div class="card"><h2>{}</h2><p class="muted">No readings in this period</p></div>"#,
            title
        );
    }

    let max_aqi = values.iter().map(|(_, aqi)| *aqi).max().unwrap_or(0).max(50) as f64;
    let span = (points.len().max(2) - 1) as f64;
    let coords: Vec<String> = values
        .iter()
        .map(|(i, aqi)| {
            let x = *i as f64 / span * CHART_WIDTH;
            let y = CHART_HEIGHT - (*aqi as f64 / max_aqi * CHART_HEIGHT);
            format!("{:.1},{:.1}", x, y)
        })
        .collect();

    let first = points.first().map(|p| p.timestamp.format("%d %b %H:%M").to_string());
    let last = points.last().map(|p| p.timestamp.format("%d %b %H:%M").to_string());

    format!(
        r##"<div class="card">
    <h2>{title}</h2>
    <svg class="trend" viewBox="0 0 {w} {h}" preserveAspectRatio="none">
        <polyline fill="none" stroke="#667eea" stroke-width="3" points="{coords}"/>
    </svg>
    <div class="scale-labels"><span>{first}</span><span>max AQI {max}</span><span>{last}</span></div>
</div>"##,
        title = title,
        w = CHART_WIDTH,
        h = CHART_HEIGHT,
        coords = coords.join(" "),
        first = first.unwrap_or_default(),
        max = max_aqi as u16,
        last = last.unwrap_or_default(),
    )
}

const MAP_WIDTH: f64 = 600.0;
const MAP_HEIGHT: f64 = 450.0;

/// Marker radius scaled by PM2.5, capped at 100 µg/m³
fn marker_radius(pm25: Option<f64>) -> f64 {
    let pm25 = pm25.filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(0.0);
    4.0 + pm25.min(100.0) / 100.0 * 12.0
}

/// Site markers drawn over the map view
///
/// Markers are colored by AQI band and sized by PM2.5. The selected site gets
/// a red ring.
pub fn map_panel(view: &MapView) -> String {
    let mut circles = String::new();
    let mut off_screen = 0usize;

    for marker in &view.markers {
        let (x, y) = view.project(marker.latitude, marker.longitude, MAP_WIDTH, MAP_HEIGHT);
        if !(0.0..=MAP_WIDTH).contains(&x) || !(0.0..=MAP_HEIGHT).contains(&y) {
            off_screen += 1;
            continue;
        }

        let pm25 = match marker.pm25 {
            Some(v) => format!("{:.1} µg/m³", v),
            None => NO_DATA.to_string(),
        };
        if marker.selected {
            circles.push_str(&format!(
                r##"<circle cx="{:.1}" cy="{:.1}" r="15" fill="none" stroke="#ff0000" stroke-width="3"/>"##,
                x, y
            ));
        }
        circles.push_str(&format!(
            r##"<a href="/?site={q}"><circle class="marker" cx="{x:.1}" cy="{y:.1}" r="{r:.1}" fill="{color}" fill-opacity="0.8" stroke="#ffffff"><title>{site} - PM2.5: {pm25}</title></circle></a>"##,
            q = encode_query_value(&marker.site),
            x = x,
            y = y,
            r = marker_radius(marker.pm25),
            color = marker.color,
            site = escape_html(&marker.site),
            pm25 = pm25,
        ));
    }

    let footnote = if off_screen > 0 {
        format!(r#"<p class="muted">{} site(s) outside this view</p>"#, off_screen)
    } else {
        String::new()
    };

    format!(
        r##"<div class="card">
    <h2>Air Quality Map</h2>
    <svg class="map" viewBox="0 0 {w} {h}">
        <rect width="{w}" height="{h}" fill="#eef3f7"/>
        {circles}
    </svg>
    {footnote}
</div>"##,
        w = MAP_WIDTH,
        h = MAP_HEIGHT,
        circles = circles,
        footnote = footnote,
    )
}

/// Pollutants compared side by side, with a fixed color per bar
const COMPARED_POLLUTANTS: [(PollutantKind, &str); 4] = [
    (PollutantKind::Pm25, "#ff6b6b"),
    (PollutantKind::Pm10, "#4ecdc4"),
    (PollutantKind::No2, "#45b7d1"),
    (PollutantKind::O3, "#96ceb4"),
];

/// Bar chart of the latest PM2.5, PM10, NO2 and O3 values
pub fn pollutants_chart(reading: &Reading) -> String {
    let measured: Vec<f64> = COMPARED_POLLUTANTS
        .iter()
        .filter_map(|(kind, _)| reading.concentration(*kind))
        .collect();
    let mut heights = relative_heights(&measured).into_iter();

    let columns: String = COMPARED_POLLUTANTS
        .iter()
        .map(|(kind, color)| {
            // `heights` lines up with the measured values in column order
            let (bar, caption) = match reading.concentration(*kind) {
                Some(value) => (
                    format!(
                        r#"<div class="bar" style="height: {:.0}%; background: {};"></div>"#,
                        heights.next().unwrap_or(0.0),
                        color
                    ),
                    format!("{:.1}", value),
                ),
                None => (String::new(), NO_DATA.to_string()),
            };
            format!(
                r#"<div class="compare-col"><div class="compare-track">{}</div><div><strong>{}</strong></div><div class="muted">{}</div></div>"#,
                bar,
                caption,
                kind.display_name()
            )
        })
        .collect();

    format!(
        r#"<div class="card">
    <h2>Current Pollutant Levels - {site}</h2>
    <div class="compare">{columns}</div>
</div>"#,
        site = escape_html(&reading.site),
        columns = columns,
    )
}

/// AQI bars for the readings leading up to a site's latest one
pub fn history_bars(site: &str, points: &[HistoryPoint]) -> String {
    let title = format!("Historical AQI - {}", escape_html(site));
    let aqi_values: Vec<f64> = points.iter().filter_map(|p| p.aqi).map(f64::from).collect();
    if aqi_values.is_empty() {
        return format!(
            r#"<div class="card"><h2>{}</h2><p class="muted">No historical data available for {}</p></div>"#,
            title,
            escape_html(site)
        );
    }

    let mut heights = relative_heights(&aqi_values).into_iter();
    let bars: String = points
        .iter()
        .map(|p| match p.aqi {
            Some(aqi) => format!(
                r##"<div style="height: {:.0}%; background: #2e7d32;" title="{} AQI {}"></div>"##,
                heights.next().unwrap_or(0.0),
                p.timestamp.format("%m-%d %H:%M"),
                aqi
            ),
            None => format!(
                r#"<div style="height: 0%;" title="{} {}"></div>"#,
                p.timestamp.format("%m-%d %H:%M"),
                NO_DATA
            ),
        })
        .collect();

    let first = points.first().map(|p| p.timestamp.format("%m-%d %H:%M").to_string());
    let last = points.last().map(|p| p.timestamp.format("%m-%d %H:%M").to_string());

    format!(
        r#"<div class="card">
    <h2>{title}</h2>
    <div class="bars">{bars}</div>
    <div class="scale-labels"><span>{first}</span><span>{last}</span></div>
</div>"#,
        title = title,
        bars = bars,
        first = first.unwrap_or_default(),
        last = last.unwrap_or_default(),
    )
}

/// Bars shown on the detail page
const DETAIL_BAR_COUNT: usize = 48;

/// Detail view for one pollutant at one site
pub fn pollutant_detail(kind: PollutantKind, site: &str, sample: &[Reading]) -> String {
    let info = kind.info();
    let values: Vec<f64> = sample
        .iter()
        .filter_map(|r| r.concentration(kind))
        .filter(|v| v.is_finite() && *v >= 0.0)
        .collect();
    let current = sample.last().and_then(|r| r.concentration(kind));
    let classification = classify_or_unknown(kind, current);

    let stats = match SeriesStats::from_values(&values) {
        Some(stats) => format!(
            r#"<div class="stats">
        <div><div class="stat-value">{:.1}</div><div class="stat-label">Min</div></div>
        <div><div class="stat-value">{:.1}</div><div class="stat-label">Max</div></div>
        <div><div class="stat-value">{:.1}</div><div class="stat-label">Average</div></div>
        <div><div class="stat-value">{}</div><div class="stat-label">Readings</div></div>
    </div>"#,
            stats.min, stats.max, stats.average, stats.count
        ),
        None => format!(r#"<p class="muted">{}</p>"#, NO_DATA),
    };

    let recent = &values[values.len().saturating_sub(DETAIL_BAR_COUNT)..];
    let bars: String = recent
        .iter()
        .zip(relative_heights(recent))
        .map(|(value, height)| {
            let color = classify_pollutant(kind, *value)
                .map(|c| c.marker_color)
                .unwrap_or(Classification::UNKNOWN.marker_color);
            format!(
                r#"<div style="height: {:.0}%; background: {};" title="{:.1} {}"></div>"#,
                height,
                color,
                value,
                info.unit
            )
        })
        .collect();

    format!(
        r#"<div class="card">
    <p><a href="/?site={q}">← Back to dashboard</a></p>
    <h2>{icon} {name} in {site}</h2>
    <p>{description}</p>
    <p class="muted"><strong>Measured in:</strong> {unit}</p>
    <p class="muted"><strong>Sources:</strong> {sources}</p>
    <p class="muted"><strong>Health effects:</strong> {effects}</p>
</div>
<div class="card" style="background: {bg};">
    <div class="muted">Current</div>
    <div class="aqi-value" style="color: {marker};">{current}</div>
    <div class="aqi-status" style="color: {marker};">{label}</div>
    {stats}
</div>
<div class="card">
    <h2>Recent readings</h2>
    <div class="bars">{bars}</div>
</div>"#,
        q = encode_query_value(site),
        icon = info.icon,
        name = info.name,
        site = escape_html(site),
        description = info.description,
        unit = info.unit,
        sources = info.sources,
        effects = info.health_effects,
        bg = classification.background_color,
        marker = classification.marker_color,
        current = format_value(current, info.unit),
        label = if current.is_some() { classification.label } else { NO_DATA },
        stats = stats,
        bars = bars,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 2)
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap()
    }

    fn london() -> Reading {
        let mut r = Reading::empty("London", ts(14));
        r.pm25 = Some(40.0);
        r.pm10 = Some(20.0);
        r.no2 = Some(30.0);
        r.temperature = Some(11.2);
        r.humidity = Some(70.0);
        r
    }

    #[test]
    fn test_aqi_card_shows_status() {
        let summary = SiteSummary::from_reading(london());
        let html = aqi_card(Some(&summary));
        assert!(html.contains(">111<"));
        assert!(html.contains("Unhealthy for Sensitive Groups"));
        assert!(html.contains("#ff7e00"));
        assert!(html.contains("02 Apr 14:30"));
        assert!(html.contains("11.2 °C"));
    }

    #[test]
    fn test_aqi_card_without_site() {
        assert!(aqi_card(None).contains("City data not available"));
    }

    #[test]
    fn test_aqi_card_without_pm25() {
        let mut reading = london();
        reading.pm25 = None;
        let html = aqi_card(Some(&SiteSummary::from_reading(reading)));
        assert!(html.contains(NO_DATA));
        assert!(html.contains("#666666"));
    }

    #[test]
    fn test_aqi_card_hides_missing_weather() {
        let mut reading = london();
        reading.temperature = None;
        reading.humidity = None;
        let html = aqi_card(Some(&SiteSummary::from_reading(reading)));
        assert!(!html.contains("class=\"weather\""));
    }

    #[test]
    fn test_pollutant_cards_mark_missing_values() {
        let html = pollutant_cards(&london());
        // CO and SO2 were never measured
        assert_eq!(html.matches(NO_DATA).count(), 6, "value and label for CO and SO2, plus O3");
        assert!(html.contains("/pollutant/co?site=London"));
        assert!(html.contains("40.0 µg/m³"));
    }

    #[test]
    fn test_site_names_are_escaped() {
        let mut reading = london();
        reading.site = "<script>".to_string();
        let html = city_cards(&[SiteSummary::from_reading(reading)]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_aqi_index_lists_all_bands() {
        let html = aqi_index();
        for category in AqiCategory::all_variants() {
            assert!(html.contains(category.label()));
        }
        assert!(html.contains("301+"));
        assert!(html.contains("0-50"));
    }

    #[test]
    fn test_trend_chart_empty() {
        let html = trend_chart("Leeds", TimeRange::Last7Days, &[]);
        assert!(html.contains("No readings in this period"));
        assert!(html.contains("Last 7 Days"));
    }

    #[test]
    fn test_trend_chart_polyline() {
        let points = vec![
            HistoryPoint { timestamp: ts(1), aqi: Some(50), pm25: Some(12.0) },
            HistoryPoint { timestamp: ts(2), aqi: Some(100), pm25: Some(35.4) },
        ];
        let html = trend_chart("Leeds", TimeRange::Last24Hours, &points);
        assert!(html.contains("points=\"0.0,100.0 600.0,0.0\""));
    }

    #[test]
    fn test_pollutant_detail_stats() {
        let mut older = london();
        older.timestamp = ts(10);
        older.pm25 = Some(10.0);
        let html = pollutant_detail(PollutantKind::Pm25, "London", &[older, london()]);
        assert!(html.contains("Particulate Matter (PM2.5)"));
        assert!(html.contains(">25.0<"), "average of 10 and 40");
        assert!(html.contains("Poor"));
    }

    #[test]
    fn test_pollutant_detail_without_values() {
        let html = pollutant_detail(PollutantKind::So2, "London", &[london()]);
        assert!(html.contains(NO_DATA));
        assert!(html.contains("#f5f5f5"));
    }

    fn positioned(site: &str, lat: f64, lon: f64, pm25: Option<f64>) -> SiteSummary {
        let mut r = Reading::empty(site, ts(9));
        r.latitude = Some(lat);
        r.longitude = Some(lon);
        r.pm25 = pm25;
        SiteSummary::from_reading(r)
    }

    #[test]
    fn test_map_panel_draws_markers() {
        let summaries = vec![
            positioned("London", 51.5, -0.12, Some(40.0)),
            positioned("York", 53.96, -1.08, None),
        ];
        let html = map_panel(&crate::summary::map_view(&summaries, None));
        assert_eq!(html.matches(r#"class="marker""#).count(), 2);
        assert!(html.contains("#ff7e00"), "London colored by AQI band");
        assert!(html.contains("#666666"), "York without PM2.5 is gray");
        assert!(html.contains("York - PM2.5: No data"));
        assert!(html.contains("/?site=London"));
        assert!(!html.contains("stroke=\"#ff0000\""), "nothing selected");
    }

    #[test]
    fn test_map_panel_selected_site_centered() {
        let summaries = vec![
            positioned("London", 51.5, -0.12, Some(40.0)),
            positioned("York", 53.96, -1.08, Some(8.0)),
        ];
        let html = map_panel(&crate::summary::map_view(&summaries, Some("London")));
        assert!(html.contains(r##"<circle cx="300.0" cy="225.0" r="15" fill="none" stroke="#ff0000""##));
        // York is far outside a city-level view
        assert_eq!(html.matches(r#"class="marker""#).count(), 1);
        assert!(html.contains("1 site(s) outside this view"));
    }

    #[test]
    fn test_pollutants_chart_bars() {
        let html = pollutants_chart(&london());
        assert!(html.contains("Current Pollutant Levels - London"));
        // PM2.5 40 is the largest of 40, 20, 30 with O3 missing
        assert!(html.contains(r#"height: 100%; background: #ff6b6b;"#));
        assert!(html.contains(r#"height: 50%; background: #4ecdc4;"#));
        assert!(html.contains(r#"height: 75%; background: #45b7d1;"#));
        assert!(!html.contains("#96ceb4"), "no bar for missing O3");
        assert_eq!(html.matches(NO_DATA).count(), 1);
    }

    #[test]
    fn test_history_bars() {
        let points = vec![
            HistoryPoint { timestamp: ts(1), aqi: Some(50), pm25: Some(12.0) },
            HistoryPoint { timestamp: ts(2), aqi: None, pm25: None },
            HistoryPoint { timestamp: ts(3), aqi: Some(100), pm25: Some(35.4) },
        ];
        let html = history_bars("Leeds", &points);
        assert!(html.contains("Historical AQI - Leeds"));
        assert!(html.contains(r#"height: 50%; background: #2e7d32;" title="04-02 01:30 AQI 50""#));
        assert!(html.contains(r#"height: 100%; background: #2e7d32;" title="04-02 03:30 AQI 100""#));
        assert!(html.contains("04-02 02:30 No data"));
    }

    #[test]
    fn test_history_bars_empty() {
        let html = history_bars("Leeds", &[]);
        assert!(html.contains("No historical data available for Leeds"));
    }

    #[test]
    fn test_pollutant_detail_uses_reference_unit() {
        let mut reading = london();
        reading.co = Some(0.4);
        let html = pollutant_detail(PollutantKind::Co, "London", &[reading]);
        assert!(html.contains("Carbon Monoxide (CO)"));
        assert!(html.contains("<strong>Measured in:</strong> ppm"));
        assert!(html.contains("0.4 ppm"));
        assert!(html.contains(r#"title="0.4 ppm""#));
    }
}
