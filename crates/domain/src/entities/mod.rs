//! Domain entities - Rows of the observation dataset and values derived from them

mod measurement;
mod station;
mod temperature_stats;

pub use measurement::{PrecipitationReading, TemperatureObservation};
pub use station::Station;
pub use temperature_stats::TemperatureStats;
