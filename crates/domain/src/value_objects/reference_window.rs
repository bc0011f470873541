//! Reference window value object
//!
//! The reference window selects "the last year of data" for the default
//! windowed listings. It is anchored on the dataset's last recorded date and
//! reaches back a fixed number of days.
//!
//! # Examples
//!
//! ```
//! use domain::ReferenceWindow;
//!
//! let window = ReferenceWindow::default();
//! assert_eq!(window.start_str(), "2016-08-23");
//! assert_eq!(window.end_str(), "2017-08-23");
//! ```

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Storage format of measurement dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the default window in days
pub const DEFAULT_WINDOW_DAYS: u32 = 365;

/// Last recorded date of the bundled dataset
///
/// This is a fixed literal, not a live query result.
pub fn dataset_last_recorded_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 8, 23).unwrap_or(NaiveDate::MIN)
}

/// A window of `days` days ending at `last_recorded`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceWindow {
    last_recorded: NaiveDate,
    start: NaiveDate,
    days: u32,
}

impl ReferenceWindow {
    /// Create a window reaching `days` back from `last_recorded`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the subtraction leaves the
    /// representable date range.
    pub fn new(last_recorded: NaiveDate, days: u32) -> Result<Self, DomainError> {
        let start = last_recorded
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or_else(|| {
                DomainError::ValidationError(format!(
                    "window of {days} days before {last_recorded} is out of range"
                ))
            })?;

        Ok(Self {
            last_recorded,
            start,
            days,
        })
    }

    /// Parse the anchor date from `YYYY-MM-DD` text
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::ReferenceWindow;
    ///
    /// let window = ReferenceWindow::parse("2017-08-23", 7).unwrap();
    /// assert_eq!(window.start_str(), "2017-08-16");
    /// assert!(ReferenceWindow::parse("23/08/2017", 7).is_err());
    /// ```
    pub fn parse(last_recorded: &str, days: u32) -> Result<Self, DomainError> {
        let date = NaiveDate::parse_from_str(last_recorded, DATE_FORMAT)
            .map_err(|e| DomainError::InvalidDateTime(format!("{last_recorded}: {e}")))?;
        Self::new(date, days)
    }

    /// First day included in the window
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Anchor date the window was computed from
    pub const fn last_recorded(&self) -> NaiveDate {
        self.last_recorded
    }

    /// Window length in days
    pub const fn days(&self) -> u32 {
        self.days
    }

    /// Window start in storage format, ready for text comparison
    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// Anchor date in storage format
    pub fn end_str(&self) -> String {
        self.last_recorded.format(DATE_FORMAT).to_string()
    }
}

impl Default for ReferenceWindow {
    fn default() -> Self {
        let last_recorded = dataset_last_recorded_date();
        let start = last_recorded
            .checked_sub_days(Days::new(u64::from(DEFAULT_WINDOW_DAYS)))
            .unwrap_or(last_recorded);
        Self {
            last_recorded,
            start,
            days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl fmt::Display for ReferenceWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start_str(), self.end_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_starts_one_year_before_last_date() {
        let window = ReferenceWindow::default();
        assert_eq!(window.start_str(), "2016-08-23");
        assert_eq!(window.days(), 365);
    }

    #[test]
    fn default_matches_explicit_construction() {
        let explicit = ReferenceWindow::new(dataset_last_recorded_date(), 365).unwrap();
        assert_eq!(explicit, ReferenceWindow::default());
    }

    #[test]
    fn window_crossing_leap_day() {
        // 2016 is a leap year, so 365 days before 2016-08-23 is 2015-08-24
        let window = ReferenceWindow::parse("2016-08-23", 365).unwrap();
        assert_eq!(window.start_str(), "2015-08-24");
    }

    #[test]
    fn zero_day_window_starts_on_anchor() {
        let window = ReferenceWindow::parse("2017-08-23", 0).unwrap();
        assert_eq!(window.start(), window.last_recorded());
    }

    #[test]
    fn parse_rejects_malformed_anchor() {
        let err = ReferenceWindow::parse("2017-02-30", 365).unwrap_err();
        assert!(matches!(err, DomainError::InvalidDateTime(_)));
    }

    #[test]
    fn out_of_range_window_rejected() {
        let err = ReferenceWindow::new(NaiveDate::MIN, 1).unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[test]
    fn display_shows_inclusive_range() {
        let window = ReferenceWindow::default();
        assert_eq!(window.to_string(), "2016-08-23..=2017-08-23");
    }
}
