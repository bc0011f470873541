//! Date bound value object
//!
//! A `DateBound` is the raw text a caller supplied as the start or end of a
//! date filter. Dates are stored as `YYYY-MM-DD` text, and for that fixed
//! format lexicographic ordering coincides with chronological ordering, so
//! bounds are compared as strings and never validated. A malformed bound
//! simply matches nothing.
//!
//! # Examples
//!
//! ```
//! use domain::DateBound;
//!
//! let start = DateBound::new("2016-08-23");
//! assert_eq!(start.as_str(), "2016-08-23");
//! assert!(start.is_iso_date());
//!
//! // No validation is performed
//! let odd = DateBound::new("yesterday");
//! assert!(!odd.is_iso_date());
//! ```

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::reference_window::DATE_FORMAT;

/// Raw lower or upper bound of a date filter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateBound(String);

impl DateBound {
    /// Wrap a caller-supplied bound verbatim
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The bound exactly as supplied
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether the bound happens to be a well-formed `YYYY-MM-DD` date
    ///
    /// Only used for diagnostics; filtering never depends on it.
    pub fn is_iso_date(&self) -> bool {
        NaiveDate::parse_from_str(&self.0, DATE_FORMAT).is_ok()
    }
}

impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_bound_is_kept_verbatim() {
        let bound = DateBound::new("not-a-date");
        assert_eq!(bound.as_str(), "not-a-date");
        assert!(!bound.is_iso_date());
    }

    #[test]
    fn iso_date_detected() {
        assert!(DateBound::new("2010-01-01").is_iso_date());
        assert!(!DateBound::new("2010/01/01").is_iso_date());
    }

    #[test]
    fn display_and_into_inner_keep_raw_text() {
        let bound = DateBound::new("2016-8-23");
        assert_eq!(bound.to_string(), "2016-8-23");
        assert_eq!(bound.into_inner(), "2016-8-23");
    }
}
