//! Builders for small observation datasets on disk.

use std::path::Path;

use rusqlite::{Connection, params};

/// One measurement row to insert
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedMeasurement {
    pub station: &'static str,
    pub date: &'static str,
    pub prcp: Option<f64>,
    pub tobs: Option<f64>,
}

const fn row(
    station: &'static str,
    date: &'static str,
    prcp: Option<f64>,
    tobs: Option<f64>,
) -> SeedMeasurement {
    SeedMeasurement {
        station,
        date,
        prcp,
        tobs,
    }
}

/// Stations and measurements inserted in the given (storage) order
///
/// A `None` station is inserted as a row with a NULL identifier.
#[derive(Debug, Clone, Copy)]
pub struct SeedDataset {
    pub stations: &'static [Option<&'static str>],
    pub measurements: &'static [SeedMeasurement],
}

/// Ten measurements over three stations
///
/// `USC00519281` is the most active station (5 rows). Rows on or after
/// 2016-08-23 carry tobs 81, 76, 77, 68, 70, 79, 81, 76 (mean 76.0).
pub const SAMPLE_DATASET: SeedDataset = SeedDataset {
    stations: &[Some("USC00519397"), Some("USC00513117"), Some("USC00519281")],
    measurements: &[
        row("USC00519397", "2016-08-22", Some(0.1), Some(75.0)),
        row("USC00519397", "2016-08-23", Some(0.0), Some(81.0)),
        row("USC00513117", "2016-08-23", Some(0.15), Some(76.0)),
        row("USC00519281", "2016-08-22", Some(0.5), Some(70.0)),
        row("USC00519281", "2016-08-23", Some(1.79), Some(77.0)),
        row("USC00519281", "2016-12-01", Some(0.02), Some(68.0)),
        row("USC00513117", "2017-08-22", None, Some(70.0)),
        row("USC00519281", "2017-08-18", Some(0.06), Some(79.0)),
        row("USC00519397", "2017-08-23", Some(0.0), Some(81.0)),
        row("USC00519281", "2017-08-23", Some(0.45), Some(76.0)),
    ],
};

/// Two stations with equal row counts; `STATION_B` appears first in storage
pub const TIED_DATASET: SeedDataset = SeedDataset {
    stations: &[Some("STATION_A"), Some("STATION_B")],
    measurements: &[
        row("STATION_B", "2017-01-01", Some(0.0), Some(60.0)),
        row("STATION_A", "2017-01-01", Some(0.1), Some(61.0)),
        row("STATION_A", "2017-01-02", Some(0.2), Some(62.0)),
        row("STATION_B", "2017-01-02", Some(0.3), Some(63.0)),
    ],
};

/// `SAMPLE_DATASET` with a station row lacking its identifier
pub const UNIDENTIFIED_STATION_DATASET: SeedDataset = SeedDataset {
    stations: &[Some("USC00519397"), None, Some("USC00519281")],
    measurements: SAMPLE_DATASET.measurements,
};

/// Create the two dataset tables at `path` and insert `dataset`
pub fn seed_dataset(path: &Path, dataset: &SeedDataset) -> rusqlite::Result<()> {
    let mut conn = Connection::open(path)?;
    conn.execute_batch(
        "CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT,
            name TEXT,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT
        );
        CREATE TABLE measurement (
            id INTEGER PRIMARY KEY,
            station TEXT,
            date TEXT,
            prcp FLOAT,
            tobs FLOAT
        );",
    )?;

    let tx = conn.transaction()?;
    for station in dataset.stations {
        tx.execute("INSERT INTO station (station) VALUES (?1)", params![station])?;
    }
    for m in dataset.measurements {
        tx.execute(
            "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
            params![m.station, m.date, m.prcp, m.tobs],
        )?;
    }
    tx.commit()
}
