//! Database models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::classify::{compute_aqi, PollutantKind};
use crate::Result;

/// One row of the readings table
///
/// Every measured field is optional. A column that is NULL or missing from the
/// table is `None`; no placeholder value is ever substituted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub site: String,
    pub timestamp: NaiveDateTime,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub co: Option<f64>,
    pub so2: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Reading {
    /// Reading for `site` with no measurements
    pub fn empty(site: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            site: site.into(),
            timestamp,
            pm25: None,
            pm10: None,
            no2: None,
            o3: None,
            co: None,
            so2: None,
            temperature: None,
            humidity: None,
            latitude: None,
            longitude: None,
        }
    }

    /// Measured concentration of `kind`, if recorded
    pub fn concentration(&self, kind: PollutantKind) -> Option<f64> {
        match kind {
            PollutantKind::Pm25 => self.pm25,
            PollutantKind::Pm10 => self.pm10,
            PollutantKind::No2 => self.no2,
            PollutantKind::O3 => self.o3,
            PollutantKind::Co => self.co,
            PollutantKind::So2 => self.so2,
        }
    }

    /// AQI from this reading's PM2.5, `Ok(None)` when PM2.5 was not recorded
    pub fn aqi(&self) -> Result<Option<u16>> {
        self.pm25.map(compute_aqi).transpose()
    }

    /// Coordinates, when both are present
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_missing_values_stay_missing() {
        let reading = Reading::empty("London", ts());
        for kind in PollutantKind::all_variants() {
            assert_eq!(reading.concentration(*kind), None);
        }
        assert_eq!(reading.aqi().unwrap(), None);
        assert_eq!(reading.position(), None);
    }

    #[test]
    fn test_aqi_from_pm25() {
        let mut reading = Reading::empty("Leeds", ts());
        reading.pm25 = Some(35.4);
        assert_eq!(reading.aqi().unwrap(), Some(100));

        reading.pm25 = Some(-3.0);
        assert!(reading.aqi().is_err());
    }

    #[test]
    fn test_position_requires_both_coordinates() {
        let mut reading = Reading::empty("Bath", ts());
        reading.latitude = Some(51.38);
        assert_eq!(reading.position(), None);
        reading.longitude = Some(-2.36);
        assert_eq!(reading.position(), Some((51.38, -2.36)));
    }
}
