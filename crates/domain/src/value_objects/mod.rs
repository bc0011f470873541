//! Value Objects - Immutable, identity-less domain primitives

mod date_bound;
mod reference_window;
mod station_id;

pub use date_bound::DateBound;
pub use reference_window::{DATE_FORMAT, DEFAULT_WINDOW_DAYS, ReferenceWindow, dataset_last_recorded_date};
pub use station_id::StationId;
