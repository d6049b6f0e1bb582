//! PM2.5-derived Air Quality Index
//!
//! Seven piecewise-linear segments map a PM2.5 concentration (µg/m³) onto the
//! 0-500 AQI scale. Results are truncated, never rounded.

use serde::Serialize;

use super::validate_concentration;
use crate::Result;

/// Upper end of the AQI scale
pub const AQI_MAX: u16 = 500;

/// One linear segment of the PM2.5 → AQI transform
struct AqiSegment {
    pm_lo: f64,
    pm_hi: f64,
    aqi_lo: f64,
    aqi_hi: f64,
}

const AQI_SEGMENTS: [AqiSegment; 7] = [
    AqiSegment { pm_lo: 0.0, pm_hi: 12.0, aqi_lo: 0.0, aqi_hi: 50.0 },
    AqiSegment { pm_lo: 12.0, pm_hi: 35.4, aqi_lo: 50.0, aqi_hi: 100.0 },
    AqiSegment { pm_lo: 35.4, pm_hi: 55.4, aqi_lo: 100.0, aqi_hi: 150.0 },
    AqiSegment { pm_lo: 55.4, pm_hi: 150.4, aqi_lo: 150.0, aqi_hi: 200.0 },
    AqiSegment { pm_lo: 150.4, pm_hi: 250.4, aqi_lo: 200.0, aqi_hi: 300.0 },
    AqiSegment { pm_lo: 250.4, pm_hi: 350.4, aqi_lo: 300.0, aqi_hi: 400.0 },
    AqiSegment { pm_lo: 350.4, pm_hi: 500.4, aqi_lo: 400.0, aqi_hi: 500.0 },
];

/// Compute the AQI for a PM2.5 concentration
///
/// Each segment closes on its upper bound (`pm25 <= pm_hi`), so a value exactly
/// on a boundary takes the top of the lower segment. Concentrations above
/// 500.4 clamp to [`AQI_MAX`].
///
/// # Errors
/// `Error::InvalidInput` for negative, NaN or infinite input.
///
/// # Examples
/// ```
/// use airq_common::compute_aqi;
///
/// assert_eq!(compute_aqi(0.0).unwrap(), 0);
/// assert_eq!(compute_aqi(12.0).unwrap(), 50);
/// assert_eq!(compute_aqi(35.4).unwrap(), 100);
/// assert_eq!(compute_aqi(600.0).unwrap(), 500);
/// assert!(compute_aqi(-1.0).is_err());
/// ```
pub fn compute_aqi(pm25: f64) -> Result<u16> {
    let c = validate_concentration(pm25)?;

    for seg in &AQI_SEGMENTS {
        if c <= seg.pm_hi {
            let aqi = seg.aqi_lo + (c - seg.pm_lo) / (seg.pm_hi - seg.pm_lo) * (seg.aqi_hi - seg.aqi_lo);
            return Ok((aqi.floor() as u16).min(AQI_MAX));
        }
    }

    Ok(AQI_MAX)
}

/// AQI health category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    /// Band an AQI value (0-50 Good, 51-100 Moderate, ..., 301+ Hazardous)
    pub fn from_aqi(aqi: u16) -> Self {
        match aqi {
            0..=50 => AqiCategory::Good,
            51..=100 => AqiCategory::Moderate,
            101..=150 => AqiCategory::UnhealthyForSensitiveGroups,
            151..=200 => AqiCategory::Unhealthy,
            201..=300 => AqiCategory::VeryUnhealthy,
            _ => AqiCategory::Hazardous,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    /// Ordinal position on the AQI scale (0 = Good)
    pub fn severity_rank(&self) -> u8 {
        match self {
            AqiCategory::Good => 0,
            AqiCategory::Moderate => 1,
            AqiCategory::UnhealthyForSensitiveGroups => 2,
            AqiCategory::Unhealthy => 3,
            AqiCategory::VeryUnhealthy => 4,
            AqiCategory::Hazardous => 5,
        }
    }

    /// Emoji shown beside the status label
    pub fn icon(&self) -> &'static str {
        match self {
            AqiCategory::Good => "😊",
            AqiCategory::Moderate => "😐",
            AqiCategory::UnhealthyForSensitiveGroups | AqiCategory::Unhealthy => "😷",
            AqiCategory::VeryUnhealthy => "🤢",
            AqiCategory::Hazardous => "☠️",
        }
    }

    pub fn marker_color(&self) -> &'static str {
        match self {
            AqiCategory::Good => "#00e400",
            AqiCategory::Moderate => "#ff8c00",
            AqiCategory::UnhealthyForSensitiveGroups => "#ff7e00",
            AqiCategory::Unhealthy => "#ff0000",
            AqiCategory::VeryUnhealthy => "#8f3f97",
            AqiCategory::Hazardous => "#7e0023",
        }
    }

    pub fn background_color(&self) -> &'static str {
        match self {
            AqiCategory::Good => "#e8f5e8",
            AqiCategory::Moderate | AqiCategory::UnhealthyForSensitiveGroups => "#fff3e0",
            AqiCategory::Unhealthy => "#ffebee",
            AqiCategory::VeryUnhealthy => "#f3e5f5",
            AqiCategory::Hazardous => "#fce4ec",
        }
    }

    /// Inclusive AQI range covered by this category
    pub fn aqi_range(&self) -> (u16, u16) {
        match self {
            AqiCategory::Good => (0, 50),
            AqiCategory::Moderate => (51, 100),
            AqiCategory::UnhealthyForSensitiveGroups => (101, 150),
            AqiCategory::Unhealthy => (151, 200),
            AqiCategory::VeryUnhealthy => (201, 300),
            AqiCategory::Hazardous => (301, AQI_MAX),
        }
    }

    /// All categories, least severe first
    pub fn all_variants() -> &'static [AqiCategory] {
        &[
            AqiCategory::Good,
            AqiCategory::Moderate,
            AqiCategory::UnhealthyForSensitiveGroups,
            AqiCategory::Unhealthy,
            AqiCategory::VeryUnhealthy,
            AqiCategory::Hazardous,
        ]
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Display attributes for an AQI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AqiSeverity {
    pub label: &'static str,
    pub severity_rank: u8,
    pub icon: &'static str,
    pub marker_color: &'static str,
    pub background_color: &'static str,
}

impl From<AqiCategory> for AqiSeverity {
    fn from(category: AqiCategory) -> Self {
        Self {
            label: category.label(),
            severity_rank: category.severity_rank(),
            icon: category.icon(),
            marker_color: category.marker_color(),
            background_color: category.background_color(),
        }
    }
}

/// Status label, icon and colors for an AQI value
pub fn aqi_severity(aqi: u16) -> AqiSeverity {
    AqiCategory::from_aqi(aqi).into()
}
