//! Measurement projections served by the listing routes
//!
//! A `measurement` row carries a station, a `YYYY-MM-DD` date and optional
//! precipitation and temperature readings; the listing routes only ever
//! read two columns of it at a time.

use serde::{Deserialize, Serialize};

/// `(date, precipitation)` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationReading {
    pub date: String,
    pub precipitation: Option<f64>,
}

/// `{date, temperature}` object as served by the tobs listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureObservation {
    pub date: String,
    pub temperature: Option<f64>,
}
