//! Climate query service
//!
//! Computes the startup context once (reference window and most-active
//! station) and answers every query route against the store port.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use domain::{
    DEFAULT_WINDOW_DAYS, DateBound, ReferenceWindow, StationId, TemperatureObservation,
    TemperatureStats,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{ClimateStorePort, StationActivity};

/// Message returned when the open-ended aggregate matches nothing
pub const DATE_NOT_FOUND_MESSAGE: &str = "Date not found. Please enter a start date";

/// Message returned when the bounded aggregate matches nothing
pub const DATE_RANGE_NOT_FOUND_MESSAGE: &str =
    "Date range not found. Please enter start and end date.";

/// Dataset settings that drive the startup context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Last recorded date of the dataset, `YYYY-MM-DD` (default: 2017-08-23)
    #[serde(default = "default_reference_date")]
    pub reference_date: String,

    /// Days covered by the reference window (default: 365)
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Anchor the window on `MAX(date)` read at startup instead of
    /// `reference_date` (default: false)
    #[serde(default)]
    pub track_latest_date: bool,
}

fn default_reference_date() -> String {
    "2017-08-23".to_string()
}

const fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            reference_date: default_reference_date(),
            window_days: default_window_days(),
            track_latest_date: false,
        }
    }
}

/// Values derived once at startup and read by every request
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateContext {
    /// Window used by the precipitation and tobs listings
    pub reference_window: ReferenceWindow,
    /// Station with the most measurement rows, `None` for an empty table
    pub most_active_station: Option<StationActivity>,
    /// `MAX(date)` observed at startup
    pub latest_recorded_date: Option<String>,
}

impl ClimateContext {
    /// Window start in storage format
    pub fn reference_window_start(&self) -> String {
        self.reference_window.start_str()
    }

    /// Identifier of the most active station, if any
    pub fn most_active_station_id(&self) -> Option<&StationId> {
        self.most_active_station.as_ref().map(|a| &a.station)
    }
}

/// Service answering the climate query routes
pub struct ClimateService {
    store: Arc<dyn ClimateStorePort>,
    context: ClimateContext,
}

impl fmt::Debug for ClimateService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClimateService")
            .field("store", &"<dyn ClimateStorePort>")
            .field("context", &self.context)
            .finish()
    }
}

impl ClimateService {
    /// Run the startup queries and build the service
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be queried or the configured reference
    /// date is not a valid `YYYY-MM-DD` date.
    #[instrument(skip(store))]
    pub async fn initialize(
        store: Arc<dyn ClimateStorePort>,
        config: &DatasetConfig,
    ) -> Result<Self, ApplicationError> {
        let latest = store.latest_recorded_date().await?;

        let anchor = match &latest {
            Some(latest) if config.track_latest_date => latest.as_str(),
            Some(latest) => {
                if *latest != config.reference_date {
                    warn!(
                        latest_recorded_date = %latest,
                        reference_date = %config.reference_date,
                        "Dataset's latest date differs from the configured reference date; \
                         keeping the configured date"
                    );
                }
                config.reference_date.as_str()
            },
            None => {
                warn!("Measurement table is empty");
                config.reference_date.as_str()
            },
        };

        let reference_window = ReferenceWindow::parse(anchor, config.window_days)?;

        let most_active_station = store.station_activity().await?.into_iter().next();
        match &most_active_station {
            Some(activity) => info!(
                station = %activity.station,
                observations = activity.observations,
                "Most active station determined"
            ),
            None => warn!("No station activity found; tobs listing will be empty"),
        }

        info!(
            window = %reference_window,
            latest_recorded_date = latest.as_deref().unwrap_or("<none>"),
            "Climate context initialized"
        );

        Ok(Self::with_context(
            store,
            ClimateContext {
                reference_window,
                most_active_station,
                latest_recorded_date: latest,
            },
        ))
    }

    /// Build the service from an already computed context
    pub fn with_context(store: Arc<dyn ClimateStorePort>, context: ClimateContext) -> Self {
        Self { store, context }
    }

    /// The startup context
    pub const fn context(&self) -> &ClimateContext {
        &self.context
    }

    /// Precipitation per date since the window start
    ///
    /// Keyed by date alone, so when several stations report the same date
    /// the last row read wins.
    #[instrument(skip(self))]
    pub async fn precipitation(&self) -> Result<BTreeMap<String, Option<f64>>, ApplicationError> {
        let since = self.context.reference_window_start();
        let readings = self.store.precipitation_since(&since).await?;
        debug!(rows = readings.len(), "Precipitation rows loaded");

        let mut by_date = BTreeMap::new();
        for reading in readings {
            by_date.insert(reading.date, reading.precipitation);
        }
        Ok(by_date)
    }

    /// Every station identifier in storage order, `None` for unidentified rows
    #[instrument(skip(self))]
    pub async fn stations(&self) -> Result<Vec<Option<StationId>>, ApplicationError> {
        let stations = self.store.stations().await?;
        Ok(stations.into_iter().map(|s| s.station).collect())
    }

    /// Temperature observations of the most active station since the window start
    #[instrument(skip(self))]
    pub async fn temperature_observations(
        &self,
    ) -> Result<Vec<TemperatureObservation>, ApplicationError> {
        let Some(station) = self.context.most_active_station_id() else {
            return Ok(Vec::new());
        };
        let since = self.context.reference_window_start();
        self.store.temperature_observations(station, &since).await
    }

    /// MIN/AVG/MAX temperature for `date >= start`
    ///
    /// # Errors
    ///
    /// `ApplicationError::NotFound` when no row matched.
    #[instrument(skip(self, start), fields(start = %start))]
    pub async fn temperature_stats_from(
        &self,
        start: &DateBound,
    ) -> Result<TemperatureStats, ApplicationError> {
        if !start.is_iso_date() {
            debug!("Start bound is not an ISO date; comparing as text");
        }
        self.store
            .temperature_stats_from(start)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(DATE_NOT_FOUND_MESSAGE.to_string()))
    }

    /// MIN/AVG/MAX temperature for `start <= date <= end`
    ///
    /// # Errors
    ///
    /// `ApplicationError::NotFound` when no row matched, including
    /// `start > end`.
    #[instrument(skip(self, start, end), fields(start = %start, end = %end))]
    pub async fn temperature_stats_between(
        &self,
        start: &DateBound,
        end: &DateBound,
    ) -> Result<TemperatureStats, ApplicationError> {
        self.store
            .temperature_stats_between(start, end)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(DATE_RANGE_NOT_FOUND_MESSAGE.to_string()))
    }
}
