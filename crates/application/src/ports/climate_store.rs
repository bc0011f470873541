//! Climate store port
//!
//! Read-only access to the observation dataset. Every method runs exactly
//! one query; implementations must never modify the dataset.

use async_trait::async_trait;
use domain::{DateBound, PrecipitationReading, Station, StationId, TemperatureObservation, TemperatureStats};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Row count of one station in the measurement table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationActivity {
    pub station: StationId,
    pub observations: u64,
}

/// Port for querying the observation dataset
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClimateStorePort: Send + Sync {
    /// Most recent measurement date, `None` for an empty table
    async fn latest_recorded_date(&self) -> Result<Option<String>, ApplicationError>;

    /// Row counts per station, most active first
    ///
    /// Stations with equal counts are ordered by first appearance in
    /// storage order.
    async fn station_activity(&self) -> Result<Vec<StationActivity>, ApplicationError>;

    /// `(date, prcp)` rows with `date >= since`, ascending by date
    async fn precipitation_since(
        &self,
        since: &str,
    ) -> Result<Vec<PrecipitationReading>, ApplicationError>;

    /// All stations in storage order
    async fn stations(&self) -> Result<Vec<Station>, ApplicationError>;

    /// `(date, tobs)` rows of one station with `date >= since`, in storage order
    async fn temperature_observations(
        &self,
        station: &StationId,
        since: &str,
    ) -> Result<Vec<TemperatureObservation>, ApplicationError>;

    /// MIN/AVG/MAX of tobs over `date >= start`
    ///
    /// Returns `None` when no row matched.
    async fn temperature_stats_from(
        &self,
        start: &DateBound,
    ) -> Result<Option<TemperatureStats>, ApplicationError>;

    /// MIN/AVG/MAX of tobs over `date >= start AND date <= end`
    ///
    /// Returns `None` when no row matched.
    async fn temperature_stats_between(
        &self,
        start: &DateBound,
        end: &DateBound,
    ) -> Result<Option<TemperatureStats>, ApplicationError>;
}
