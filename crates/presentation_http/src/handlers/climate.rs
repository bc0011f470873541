//! Climate query handlers
//!
//! Listings read the reference window and most-active station fixed at
//! startup; the aggregate routes take their date bounds verbatim from the
//! path and compare them as text. A bound that cannot be decoded at all
//! matches nothing, the same as any other malformed bound.

use std::collections::BTreeMap;

use application::{DATE_NOT_FOUND_MESSAGE, DATE_RANGE_NOT_FOUND_MESSAGE};
use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use domain::{DateBound, StationId, TemperatureObservation, TemperatureStats};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::{error::ApiError, state::AppState};

/// One temperature observation of the most active station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"date": "2016-08-23", "temperature": 77.0}))]
pub struct TemperatureObservationResponse {
    /// Observation date, `YYYY-MM-DD`
    pub date: String,
    /// Observed temperature, `null` when not recorded
    pub temperature: Option<f64>,
}

impl From<TemperatureObservation> for TemperatureObservationResponse {
    fn from(observation: TemperatureObservation) -> Self {
        Self {
            date: observation.date,
            temperature: observation.temperature,
        }
    }
}

/// Temperature aggregate from a start date onwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StartStatsResponse {
    /// Start bound exactly as given in the path
    pub start_date: String,
    pub min_temp: f64,
    pub avg_temp: f64,
    pub max_temp: f64,
}

impl StartStatsResponse {
    fn new(start: DateBound, stats: TemperatureStats) -> Self {
        Self {
            start_date: start.into_inner(),
            min_temp: stats.min,
            avg_temp: stats.avg,
            max_temp: stats.max,
        }
    }
}

/// Temperature aggregate over an inclusive date range
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RangeStatsResponse {
    /// Start bound exactly as given in the path
    pub start_date: String,
    /// End bound exactly as given in the path
    pub end_date: String,
    pub min_temp: f64,
    pub avg_temp: f64,
    pub max_temp: f64,
}

impl RangeStatsResponse {
    fn new(start: DateBound, end: DateBound, stats: TemperatureStats) -> Self {
        Self {
            start_date: start.into_inner(),
            end_date: end.into_inner(),
            min_temp: stats.min,
            avg_temp: stats.avg,
            max_temp: stats.max,
        }
    }
}

/// Precipitation per date over the last year of data
#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    tag = "climate",
    responses(
        (status = 200, description = "Date to precipitation; null when not recorded",
            body = BTreeMap<String, Option<f64>>,
            example = json!({"2016-08-23": 1.79, "2016-08-24": null})),
        (status = 500, description = "Dataset failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, ApiError> {
    Ok(Json(state.climate_service.precipitation().await?))
}

/// Every station identifier in the dataset
#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    tag = "climate",
    responses(
        (status = 200, description = "Station identifiers in storage order; null when a row has none",
            body = Vec<Option<String>>,
            example = json!(["USC00519397", "USC00513117"])),
        (status = 500, description = "Dataset failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn stations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Option<String>>>, ApiError> {
    let stations = state.climate_service.stations().await?;
    Ok(Json(
        stations
            .into_iter()
            .map(|s| s.map(StationId::into_inner))
            .collect(),
    ))
}

/// Temperature observations of the most active station over the last year
#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    tag = "climate",
    responses(
        (status = 200, description = "Observations in storage order",
            body = Vec<TemperatureObservationResponse>),
        (status = 500, description = "Dataset failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn tobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemperatureObservationResponse>>, ApiError> {
    let observations = state.climate_service.temperature_observations().await?;
    Ok(Json(observations.into_iter().map(Into::into).collect()))
}

/// Minimum, average and maximum temperature from `start` to the end of the data
#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    tag = "climate",
    params(
        ("start" = String, Path, description = "Start date, YYYY-MM-DD (compared as text)")
    ),
    responses(
        (status = 200, description = "Aggregate over date >= start", body = StartStatsResponse),
        (status = 404, description = "No observation on or after start", body = crate::error::ErrorResponse),
        (status = 500, description = "Dataset failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn temperature_stats_from(
    State(state): State<AppState>,
    start: Result<Path<String>, PathRejection>,
) -> Result<Json<StartStatsResponse>, ApiError> {
    let start = match start {
        Ok(Path(start)) => DateBound::new(start),
        Err(rejection) => {
            debug!(%rejection, "Undecodable start bound");
            return Err(ApiError::NotFound(DATE_NOT_FOUND_MESSAGE.to_string()));
        },
    };
    let stats = state.climate_service.temperature_stats_from(&start).await?;
    Ok(Json(StartStatsResponse::new(start, stats)))
}

/// Minimum, average and maximum temperature between `start` and `end` inclusive
#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    tag = "climate",
    params(
        ("start" = String, Path, description = "Start date, YYYY-MM-DD (compared as text)"),
        ("end" = String, Path, description = "End date, YYYY-MM-DD (compared as text)")
    ),
    responses(
        (status = 200, description = "Aggregate over start <= date <= end", body = RangeStatsResponse),
        (status = 404, description = "No observation in range", body = crate::error::ErrorResponse),
        (status = 500, description = "Dataset failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn temperature_stats_between(
    State(state): State<AppState>,
    bounds: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<RangeStatsResponse>, ApiError> {
    let (start, end) = match bounds {
        Ok(Path((start, end))) => (DateBound::new(start), DateBound::new(end)),
        Err(rejection) => {
            debug!(%rejection, "Undecodable date range bounds");
            return Err(ApiError::NotFound(DATE_RANGE_NOT_FOUND_MESSAGE.to_string()));
        },
    };
    let stats = state
        .climate_service
        .temperature_stats_between(&start, &end)
        .await?;
    Ok(Json(RangeStatsResponse::new(start, end, stats)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> TemperatureStats {
        TemperatureStats {
            min: 58.0,
            avg: 74.590_852_904_820_76,
            max: 87.0,
        }
    }

    #[test]
    fn start_response_key_order() {
        let response = StartStatsResponse::new(DateBound::new("2016-08-23"), stats());
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"start_date":"2016-08-23","min_temp":58.0,"avg_temp":74.59085290482076,"max_temp":87.0}"#
        );
    }

    #[test]
    fn range_response_key_order() {
        let response = RangeStatsResponse::new(
            DateBound::new("2016-08-23"),
            DateBound::new("2017-08-23"),
            stats(),
        );
        let json = serde_json::to_string(&response).unwrap();
        let keys: Vec<_> = ["start_date", "end_date", "min_temp", "avg_temp", "max_temp"]
            .iter()
            .map(|k| json.find(&format!("\"{k}\"")).unwrap())
            .collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn start_date_is_echoed_verbatim() {
        let response = StartStatsResponse::new(DateBound::new("2016-8-23"), stats());
        assert_eq!(response.start_date, "2016-8-23");
    }

    #[test]
    fn observation_keys_are_date_and_temperature() {
        let response: TemperatureObservationResponse = TemperatureObservation {
            date: "2017-08-18".to_string(),
            temperature: None,
        }
        .into();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"date": "2017-08-18", "temperature": null})
        );
    }
}
