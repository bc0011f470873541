//! Test support: seeded SQLite datasets
//!
//! Only compiled for tests or with the `test-utils` feature.

mod dataset_fixture;

pub use dataset_fixture::{
    SAMPLE_DATASET, SeedDataset, SeedMeasurement, TIED_DATASET, UNIDENTIFIED_STATION_DATASET,
    seed_dataset,
};
