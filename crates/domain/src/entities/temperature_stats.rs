//! Minimum / average / maximum temperature over a date filter

use serde::{Deserialize, Serialize};

/// Aggregate of temperature observations
///
/// Values are kept at whatever precision the arithmetic produced; no
/// rounding is applied anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStats {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl TemperatureStats {
    /// Build from the nullable results of `MIN`, `AVG` and `MAX`
    ///
    /// A null minimum means no row matched, which yields `None`. SQL
    /// aggregates are all null or all present, so the other two follow.
    pub fn from_aggregates(min: Option<f64>, avg: Option<f64>, max: Option<f64>) -> Option<Self> {
        Some(Self {
            min: min?,
            avg: avg?,
            max: max?,
        })
    }

    /// Compute in memory from raw observations, skipping missing readings
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::TemperatureStats;
    ///
    /// let stats = TemperatureStats::from_values([Some(70.0), None, Some(80.0)]).unwrap();
    /// assert_eq!(stats.min, 70.0);
    /// assert_eq!(stats.avg, 75.0);
    /// assert_eq!(stats.max, 80.0);
    ///
    /// assert!(TemperatureStats::from_values([None, None]).is_none());
    /// ```
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut count = 0_u32;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for value in values.into_iter().flatten() {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }

        (count > 0).then(|| Self {
            min,
            avg: sum / f64::from(count),
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_minimum_means_no_rows() {
        assert!(TemperatureStats::from_aggregates(None, None, None).is_none());
    }

    #[test]
    fn present_aggregates_build_stats() {
        let stats = TemperatureStats::from_aggregates(Some(58.0), Some(74.59), Some(87.0)).unwrap();
        assert_eq!(stats.min, 58.0);
        assert_eq!(stats.avg, 74.59);
        assert_eq!(stats.max, 87.0);
    }

    #[test]
    fn from_values_skips_missing_readings() {
        let stats = TemperatureStats::from_values([None, Some(60.0), Some(66.0), None]).unwrap();
        assert_eq!(stats.min, 60.0);
        assert_eq!(stats.avg, 63.0);
        assert_eq!(stats.max, 66.0);
    }

    #[test]
    fn from_values_single_reading() {
        let stats = TemperatureStats::from_values([Some(71.5)]).unwrap();
        assert_eq!(stats.min, stats.max);
        assert_eq!(stats.avg, 71.5);
    }

    #[test]
    fn from_values_empty_is_none() {
        assert!(TemperatureStats::from_values(std::iter::empty()).is_none());
    }
}
