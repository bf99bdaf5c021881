//! Operational station domain entity

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::common::{PostalCode, StationId};
use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Operational status of a charging station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationStatus {
    /// Ready to charge
    #[default]
    Available,
    /// Taken out of service by an accepted malfunction report
    Defective,
    /// Currently charging a vehicle (reported by the data feed only)
    InUse,
}

impl StationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Defective => "defective",
            Self::InUse => "in_use",
        }
    }
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "defective" => Ok(Self::Defective),
            "in_use" | "inuse" => Ok(Self::InUse),
            other => Err(DomainError::validation(format!(
                "Unknown station status: {}",
                other
            ))),
        }
    }
}

/// Geographic position, carried through untouched
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A charging station as seen by the malfunction workflow
#[derive(Debug, Clone, PartialEq)]
pub struct OperationalStation {
    pub id: StationId,
    /// Display name
    pub name: String,
    pub postal_code: PostalCode,
    /// Street address, when known
    pub address: Option<String>,
    pub coordinates: Option<Coordinates>,
    status: StationStatus,
}

impl OperationalStation {
    /// New stations always start out `Available`.
    pub fn new(id: StationId, name: impl Into<String>, postal_code: PostalCode) -> Self {
        Self {
            id,
            name: name.into(),
            postal_code,
            address: None,
            coordinates: None,
            status: StationStatus::Available,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Coordinates { latitude, longitude });
        self
    }

    pub fn status(&self) -> StationStatus {
        self.status
    }

    /// True for `Available` and `InUse`, false for `Defective`.
    pub fn is_operational(&self) -> bool {
        matches!(self.status, StationStatus::Available | StationStatus::InUse)
    }

    /// Take the station out of service.
    ///
    /// Fails if the station is already defective.
    pub fn mark_as_defective(&mut self) -> DomainResult<()> {
        if self.status == StationStatus::Defective {
            return Err(DomainError::StationAlreadyDefective(self.id.to_string()));
        }
        self.status = StationStatus::Defective;
        Ok(())
    }

    /// Put the station back into service.
    ///
    /// Restores a defective station; a no-op on an available one.
    /// A station the feed reports as in use is left alone and the call fails.
    pub fn mark_as_available(&mut self) -> DomainResult<()> {
        match self.status {
            StationStatus::Defective | StationStatus::Available => {
                self.status = StationStatus::Available;
                Ok(())
            }
            StationStatus::InUse => Err(DomainError::StationInUse(self.id.to_string())),
        }
    }

    /// Apply a status reported by the external data feed.
    ///
    /// The feed may only toggle between `Available` and `InUse`; a defective
    /// station stays defective until its ticket is resolved.
    pub fn apply_feed_status(&mut self, status: StationStatus) -> DomainResult<()> {
        if self.status == StationStatus::Defective {
            return Err(DomainError::StationAlreadyDefective(self.id.to_string()));
        }
        if status == StationStatus::Defective {
            return Err(DomainError::validation(
                "Data feed cannot mark a station as defective",
            ));
        }
        self.status = status;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
