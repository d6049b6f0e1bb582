//! # AirQ Common Library
//!
//! Shared code for the AirQ dashboard including:
//! - Air quality classification (AQI transform, pollutant breakpoints)
//! - Read-only access to the readings store
//! - Time window definitions
//! - Configuration loading

pub mod classify;
pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use classify::{
    aqi_severity, classify_named, classify_pollutant, compute_aqi, AqiCategory, AqiSeverity,
    Classification, PollutantCategory, PollutantKind,
};
pub use error::{Error, Result};
pub use time::TimeRange;
