//! Air quality classification engine
//!
//! Pure, deterministic lookups over fixed tables:
//! - [`compute_aqi`] maps a PM2.5 concentration to an integer AQI (0-500)
//! - [`aqi_severity`] bands an AQI value into one of six AQI categories
//! - [`classify_pollutant`] maps a concentration to one of six pollutant categories
//!
//! Nothing here performs I/O or holds state, so every function may be called
//! from any thread without coordination.

mod aqi;
mod info;
mod pollutant;

pub use aqi::{aqi_severity, compute_aqi, AqiCategory, AqiSeverity, AQI_MAX};
pub use info::PollutantInfo;
pub use pollutant::{
    classify_named, classify_pollutant, Breakpoint, Classification, PollutantCategory,
    PollutantKind,
};

use crate::{Error, Result};

/// Reject concentrations that have no place on any scale.
///
/// NaN and infinities are rejected so they can never fall through the
/// ordered comparisons into an arbitrary band. `-0.0` is accepted as zero.
pub(crate) fn validate_concentration(value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::InvalidInput(format!(
            "concentration must be finite, got {}",
            value
        )));
    }
    if value < 0.0 {
        return Err(Error::InvalidInput(format!(
            "concentration must be non-negative, got {}",
            value
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_zero_and_positive() {
        assert_eq!(validate_concentration(0.0).unwrap(), 0.0);
        assert_eq!(validate_concentration(-0.0).unwrap(), 0.0);
        assert_eq!(validate_concentration(42.5).unwrap(), 42.5);
    }

    #[test]
    fn test_validate_rejects_negative() {
        let err = validate_concentration(-0.1).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(
                matches!(validate_concentration(value), Err(Error::InvalidInput(_))),
                "{} should be rejected",
                value
            );
        }
    }
}
