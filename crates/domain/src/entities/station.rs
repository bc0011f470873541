//! Station entity

use serde::{Deserialize, Serialize};

use crate::value_objects::StationId;

/// A fixed physical observation point
///
/// The `station` table does not enforce a non-null identifier, so a row may
/// come back without one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Station {
    pub station: Option<StationId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_identifier_serializes_as_null() {
        let json = serde_json::to_string(&Station { station: None }).unwrap();
        assert_eq!(json, r#"{"station":null}"#);
    }
}
