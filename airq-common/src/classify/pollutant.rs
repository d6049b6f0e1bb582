//! Per-pollutant breakpoint tables
//!
//! Each pollutant has five closed upper bounds (Good through Severe) followed
//! by an open-ended Hazardous band. Bands are half-open `(prev, upper]`, with
//! the first band starting at zero inclusive.

use serde::{Deserialize, Serialize};

use super::validate_concentration;
use crate::Result;

/// Monitored pollutant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PollutantKind {
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "O3")]
    O3,
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "SO2")]
    So2,
}

impl PollutantKind {
    /// Parse a pollutant name
    ///
    /// Case-insensitive. Accepts display names (`PM2.5`, `NO2`) and the store
    /// column names (`pm25`, `no2`). Returns `None` for anything else.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pm2.5" | "pm25" | "pm2_5" => Some(PollutantKind::Pm25),
            "pm10" => Some(PollutantKind::Pm10),
            "no2" => Some(PollutantKind::No2),
            "o3" => Some(PollutantKind::O3),
            "co" => Some(PollutantKind::Co),
            "so2" => Some(PollutantKind::So2),
            _ => None,
        }
    }

    /// Column holding this pollutant in the readings table
    pub fn column_name(&self) -> &'static str {
        match self {
            PollutantKind::Pm25 => "pm25",
            PollutantKind::Pm10 => "pm10",
            PollutantKind::No2 => "no2",
            PollutantKind::O3 => "o3",
            PollutantKind::Co => "co",
            PollutantKind::So2 => "so2",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PollutantKind::Pm25 => "PM2.5",
            PollutantKind::Pm10 => "PM10",
            PollutantKind::No2 => "NO2",
            PollutantKind::O3 => "O3",
            PollutantKind::Co => "CO",
            PollutantKind::So2 => "SO2",
        }
    }

    /// Unit of measure for concentrations of this pollutant
    pub fn unit(&self) -> &'static str {
        match self {
            PollutantKind::Pm25 | PollutantKind::Pm10 => "µg/m³",
            PollutantKind::No2 | PollutantKind::O3 | PollutantKind::So2 => "ppb",
            PollutantKind::Co => "ppm",
        }
    }

    /// Breakpoint table, ascending by upper bound
    pub fn breakpoints(&self) -> &'static [Breakpoint] {
        match self {
            PollutantKind::Pm25 => &PM25_TABLE,
            PollutantKind::Pm10 => &PM10_TABLE,
            PollutantKind::No2 => &NO2_TABLE,
            PollutantKind::O3 => &O3_TABLE,
            PollutantKind::Co => &CO_TABLE,
            PollutantKind::So2 => &SO2_TABLE,
        }
    }

    /// Category for a concentration already known to be valid
    pub fn category(&self, value: f64) -> PollutantCategory {
        self.breakpoints()
            .iter()
            .find(|bp| bp.upper >= value)
            .map(|bp| bp.category)
            .unwrap_or(PollutantCategory::Hazardous)
    }

    pub fn all_variants() -> &'static [PollutantKind] {
        &[
            PollutantKind::Pm25,
            PollutantKind::Pm10,
            PollutantKind::No2,
            PollutantKind::O3,
            PollutantKind::Co,
            PollutantKind::So2,
        ]
    }
}

impl std::fmt::Display for PollutantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Pollutant health category
///
/// Worded differently from [`super::AqiCategory`]; the two scales are kept apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PollutantCategory {
    Good,
    Moderate,
    Poor,
    Unhealthy,
    Severe,
    Hazardous,
}

impl PollutantCategory {
    pub fn label(&self) -> &'static str {
        match self {
            PollutantCategory::Good => "Good",
            PollutantCategory::Moderate => "Moderate",
            PollutantCategory::Poor => "Poor",
            PollutantCategory::Unhealthy => "Unhealthy",
            PollutantCategory::Severe => "Severe",
            PollutantCategory::Hazardous => "Hazardous",
        }
    }

    pub fn severity_rank(&self) -> u8 {
        match self {
            PollutantCategory::Good => 0,
            PollutantCategory::Moderate => 1,
            PollutantCategory::Poor => 2,
            PollutantCategory::Unhealthy => 3,
            PollutantCategory::Severe => 4,
            PollutantCategory::Hazardous => 5,
        }
    }

    pub fn marker_color(&self) -> &'static str {
        match self {
            PollutantCategory::Good => "#00e400",
            PollutantCategory::Moderate => "#ff8c00",
            PollutantCategory::Poor => "#ff7e00",
            PollutantCategory::Unhealthy => "#ff0000",
            PollutantCategory::Severe => "#8f3f97",
            PollutantCategory::Hazardous => "#7e0023",
        }
    }

    pub fn background_color(&self) -> &'static str {
        match self {
            PollutantCategory::Good => "#e8f5e8",
            PollutantCategory::Moderate => "#fff3e0",
            PollutantCategory::Poor => "#fff0e6",
            PollutantCategory::Unhealthy => "#ffe6e6",
            PollutantCategory::Severe => "#f3e5f5",
            PollutantCategory::Hazardous => "#fce4ec",
        }
    }

    pub fn all_variants() -> &'static [PollutantCategory] {
        &[
            PollutantCategory::Good,
            PollutantCategory::Moderate,
            PollutantCategory::Poor,
            PollutantCategory::Unhealthy,
            PollutantCategory::Severe,
            PollutantCategory::Hazardous,
        ]
    }
}

/// Closed upper bound of one band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub upper: f64,
    pub category: PollutantCategory,
}

const fn bands(bounds: [f64; 5]) -> [Breakpoint; 5] {
    [
        Breakpoint { upper: bounds[0], category: PollutantCategory::Good },
        Breakpoint { upper: bounds[1], category: PollutantCategory::Moderate },
        Breakpoint { upper: bounds[2], category: PollutantCategory::Poor },
        Breakpoint { upper: bounds[3], category: PollutantCategory::Unhealthy },
        Breakpoint { upper: bounds[4], category: PollutantCategory::Severe },
    ]
}

const PM25_TABLE: [Breakpoint; 5] = bands([12.0, 35.4, 55.4, 150.4, 250.4]);
const PM10_TABLE: [Breakpoint; 5] = bands([54.0, 154.0, 254.0, 354.0, 424.0]);
const NO2_TABLE: [Breakpoint; 5] = bands([53.0, 100.0, 360.0, 649.0, 1249.0]);
const O3_TABLE: [Breakpoint; 5] = bands([54.0, 70.0, 85.0, 105.0, 200.0]);
const CO_TABLE: [Breakpoint; 5] = bands([4.4, 9.4, 12.4, 15.4, 30.4]);
const SO2_TABLE: [Breakpoint; 5] = bands([35.0, 75.0, 185.0, 304.0, 604.0]);

/// Label and colors for one concentration
///
/// `severity_rank` is `None` only for [`Classification::UNKNOWN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub label: &'static str,
    pub severity_rank: Option<u8>,
    pub marker_color: &'static str,
    pub background_color: &'static str,
}

impl Classification {
    /// Neutral gray result for a pollutant the tables do not cover
    pub const UNKNOWN: Classification = Classification {
        label: "Unknown",
        severity_rank: None,
        marker_color: "#666666",
        background_color: "#f5f5f5",
    };

    pub fn is_unknown(&self) -> bool {
        self.severity_rank.is_none()
    }
}

impl From<PollutantCategory> for Classification {
    fn from(category: PollutantCategory) -> Self {
        Self {
            label: category.label(),
            severity_rank: Some(category.severity_rank()),
            marker_color: category.marker_color(),
            background_color: category.background_color(),
        }
    }
}

/// Classify a concentration in the pollutant's native unit
///
/// # Errors
/// `Error::InvalidInput` for negative, NaN or infinite values.
///
/// # Examples
/// ```
/// use airq_common::{classify_pollutant, PollutantKind};
///
/// assert_eq!(classify_pollutant(PollutantKind::Pm25, 12.0).unwrap().label, "Good");
/// assert_eq!(classify_pollutant(PollutantKind::Pm25, 12.1).unwrap().label, "Moderate");
/// assert_eq!(classify_pollutant(PollutantKind::Pm10, 500.0).unwrap().label, "Hazardous");
/// ```
pub fn classify_pollutant(kind: PollutantKind, value: f64) -> Result<Classification> {
    let value = validate_concentration(value)?;
    Ok(kind.category(value).into())
}

/// Classify by pollutant name
///
/// Unrecognized names yield [`Classification::UNKNOWN`] instead of an error,
/// whatever the value.
pub fn classify_named(name: &str, value: f64) -> Result<Classification> {
    match PollutantKind::from_name(name) {
        Some(kind) => classify_pollutant(kind, value),
        None => Ok(Classification::UNKNOWN),
    }
}
