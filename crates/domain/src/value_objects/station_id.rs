//! Station identifier value object
//!
//! # Examples
//!
//! ```
//! use domain::StationId;
//!
//! let id = StationId::new("USC00519281");
//! assert_eq!(id.as_str(), "USC00519281");
//! assert_eq!(id.to_string(), "USC00519281");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a physical observation station (e.g. `USC00519281`)
///
/// Serialized transparently as the bare string so JSON listings stay flat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Wrap a station code as stored in the dataset
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw station code
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier and return the raw code
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_string() {
        let id = StationId::new("USC00513117");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"USC00513117\"");
    }

    #[test]
    fn deserializes_from_bare_string() {
        let id: StationId = serde_json::from_str("\"USC00514830\"").unwrap();
        assert_eq!(id.as_str(), "USC00514830");
    }

    #[test]
    fn conversions_preserve_value() {
        assert_eq!(StationId::new("abc"), StationId::new("abc".to_string()));
        assert_eq!(StationId::new("abc").into_inner(), "abc");
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(StationId::new("USC00511918") < StationId::new("USC00519281"));
    }
}
