//! Station identifier

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shared::errors::DomainError;

/// Maximum length of a station identifier
pub const MAX_STATION_ID_LEN: usize = 50;

/// Identifier of a charging station
///
/// # Invariants
/// - Not empty (after trimming whitespace)
/// - At most 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();

        if id.trim().is_empty() {
            return Err(DomainError::validation("Station ID cannot be empty"));
        }
        if id.chars().count() > MAX_STATION_ID_LEN {
            return Err(DomainError::validation(format!(
                "Station ID too long (max {} characters)",
                MAX_STATION_ID_LEN
            )));
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for StationId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_regular_id() {
        let id = StationId::new("STATION-001").unwrap();
        assert_eq!(id.as_str(), "STATION-001");
        assert_eq!(id.to_string(), "STATION-001");
    }

    #[test]
    fn equality_is_by_value() {
        assert_eq!(
            StationId::new("BERLIN-42").unwrap(),
            StationId::new("BERLIN-42").unwrap()
        );
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(StationId::new("").is_err());
        let err = StationId::new("   ").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn length_limit_is_inclusive() {
        assert!(StationId::new("A".repeat(50)).is_ok());
        let err = StationId::new("A".repeat(51)).unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn deserialize_runs_validation() {
        let ok: StationId = serde_json::from_str("\"STATION-001\"").unwrap();
        assert_eq!(ok.as_str(), "STATION-001");
        assert!(serde_json::from_str::<StationId>("\"\"").is_err());
    }
}
