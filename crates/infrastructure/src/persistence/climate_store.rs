//! SQLite climate store implementation
//!
//! Implements the `ClimateStorePort` against the `measurement` and
//! `station` tables. Dates are stored as `YYYY-MM-DD` text and all bounds
//! are bound as text, so comparisons are lexicographic.

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{ClimateStorePort, StationActivity},
};
use async_trait::async_trait;
use domain::{
    DateBound, PrecipitationReading, Station, StationId, TemperatureObservation, TemperatureStats,
};
use rusqlite::{Connection, Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-based climate store
#[derive(Debug, Clone)]
pub struct SqliteClimateStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteClimateStore {
    /// Create a new SQLite climate store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Run `query` on a pooled connection inside a blocking task
    ///
    /// The connection goes back to the pool when the task ends, whether the
    /// query succeeded or not.
    async fn with_connection<T, F>(&self, query: F) -> Result<T, ApplicationError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;
            query(&conn).map_err(|e| ApplicationError::Internal(e.to_string()))
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

#[async_trait]
impl ClimateStorePort for SqliteClimateStore {
    #[instrument(skip(self))]
    async fn latest_recorded_date(&self) -> Result<Option<String>, ApplicationError> {
        self.with_connection(|conn| {
            conn.query_row("SELECT MAX(date) FROM measurement", [], |row| row.get(0))
        })
        .await
    }

    #[instrument(skip(self))]
    async fn station_activity(&self) -> Result<Vec<StationActivity>, ApplicationError> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT station, COUNT(station) AS observations
                 FROM measurement
                 WHERE station IS NOT NULL
                 GROUP BY station
                 ORDER BY observations DESC, MIN(rowid) ASC",
            )?;
            let rows = stmt
                .query_map([], row_to_activity)?
                .collect::<Result<Vec<_>, _>>()?;
            debug!(stations = rows.len(), "Loaded station activity");
            Ok(rows)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn precipitation_since(
        &self,
        since: &str,
    ) -> Result<Vec<PrecipitationReading>, ApplicationError> {
        let since = since.to_string();

        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT date, prcp FROM measurement
                 WHERE date >= ?1
                 ORDER BY date ASC, rowid ASC",
            )?;
            let rows = stmt
                .query_map([&since], |row| {
                    Ok(PrecipitationReading {
                        date: row.get(0)?,
                        precipitation: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            debug!(rows = rows.len(), "Loaded precipitation");
            Ok(rows)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn stations(&self) -> Result<Vec<Station>, ApplicationError> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT station FROM station")?;
            stmt.query_map([], |row| {
                Ok(Station {
                    station: row.get::<_, Option<String>>(0)?.map(StationId::new),
                })
            })?
            .collect::<Result<Vec<_>, _>>()
        })
        .await
    }

    #[instrument(skip(self), fields(station = %station))]
    async fn temperature_observations(
        &self,
        station: &StationId,
        since: &str,
    ) -> Result<Vec<TemperatureObservation>, ApplicationError> {
        let station = station.as_str().to_string();
        let since = since.to_string();

        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT date, tobs FROM measurement
                 WHERE station = ?1 AND date >= ?2",
            )?;
            let rows = stmt
                .query_map(params![station, since], |row| {
                    Ok(TemperatureObservation {
                        date: row.get(0)?,
                        temperature: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            debug!(rows = rows.len(), "Loaded temperature observations");
            Ok(rows)
        })
        .await
    }

    #[instrument(skip(self, start), fields(start = %start))]
    async fn temperature_stats_from(
        &self,
        start: &DateBound,
    ) -> Result<Option<TemperatureStats>, ApplicationError> {
        let start = start.as_str().to_string();

        self.with_connection(move |conn| {
            conn.query_row(
                "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement
                 WHERE date >= ?1",
                [&start],
                row_to_stats,
            )
        })
        .await
    }

    #[instrument(skip(self, start, end), fields(start = %start, end = %end))]
    async fn temperature_stats_between(
        &self,
        start: &DateBound,
        end: &DateBound,
    ) -> Result<Option<TemperatureStats>, ApplicationError> {
        let start = start.as_str().to_string();
        let end = end.as_str().to_string();

        self.with_connection(move |conn| {
            conn.query_row(
                "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement
                 WHERE date >= ?1 AND date <= ?2",
                params![start, end],
                row_to_stats,
            )
        })
        .await
    }
}

fn row_to_activity(row: &Row<'_>) -> rusqlite::Result<StationActivity> {
    let station: String = row.get(0)?;
    let observations: i64 = row.get(1)?;
    Ok(StationActivity {
        station: StationId::new(station),
        observations: u64::try_from(observations).unwrap_or_default(),
    })
}

fn row_to_stats(row: &Row<'_>) -> rusqlite::Result<Option<TemperatureStats>> {
    Ok(TemperatureStats::from_aggregates(
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
    ))
}
