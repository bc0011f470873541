//! Application services - Use case implementations

mod climate_service;

pub use climate_service::{
    ClimateContext, ClimateService, DATE_NOT_FOUND_MESSAGE, DATE_RANGE_NOT_FOUND_MESSAGE,
    DatasetConfig,
};
