//! Malfunction report domain entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::description::ReportDescription;
use crate::domain::common::{ReportId, StationId, TicketId};
use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Kind of malfunction a user can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalfunctionType {
    NotCharging,
    PaymentFailure,
    ConnectorIssue,
    PhysicalDamage,
    DisplayMalfunction,
    Other,
}

impl MalfunctionType {
    pub const ALL: [MalfunctionType; 6] = [
        Self::NotCharging,
        Self::PaymentFailure,
        Self::ConnectorIssue,
        Self::PhysicalDamage,
        Self::DisplayMalfunction,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotCharging => "not_charging",
            Self::PaymentFailure => "payment_failure",
            Self::ConnectorIssue => "connector_issue",
            Self::PhysicalDamage => "physical_damage",
            Self::DisplayMalfunction => "display_malfunction",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for MalfunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MalfunctionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| DomainError::validation(format!("Invalid malfunction type: {}", s)))
    }
}

/// Externally visible processing status of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Submitted,
    Validated,
    Resolved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Validated => "validated",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Processing state of a report.
///
/// A ticket exists exactly in `Processed` and `Resolved`, so a resolved
/// report without a ticket cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportState {
    /// Received, not yet checked against the station
    Submitted,
    /// Station exists and was operational when checked
    Validated,
    /// Accepted for operator handling
    Processed { ticket_id: TicketId },
    /// Closed by an operator; terminal
    Resolved {
        ticket_id: TicketId,
        resolved_at: DateTime<Utc>,
        operator_notes: Option<String>,
    },
}

impl ReportState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Validated => "validated",
            Self::Processed { .. } => "processed",
            Self::Resolved { .. } => "resolved",
        }
    }
}

/// A user-submitted malfunction claim against a station.
///
/// References its station by id only.
#[derive(Debug, Clone, PartialEq)]
pub struct MalfunctionReport {
    id: ReportId,
    station_id: StationId,
    malfunction_type: MalfunctionType,
    description: ReportDescription,
    reported_by: Option<String>,
    state: ReportState,
    created_at: DateTime<Utc>,
}

impl MalfunctionReport {
    pub fn new(
        station_id: StationId,
        malfunction_type: MalfunctionType,
        description: ReportDescription,
        reported_by: Option<String>,
    ) -> Self {
        Self {
            id: ReportId::new(),
            station_id,
            malfunction_type,
            description,
            reported_by: reported_by.filter(|r| !r.trim().is_empty()),
            state: ReportState::Submitted,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> ReportId {
        self.id
    }

    pub fn station_id(&self) -> &StationId {
        &self.station_id
    }

    pub fn malfunction_type(&self) -> MalfunctionType {
        self.malfunction_type
    }

    pub fn description(&self) -> &ReportDescription {
        &self.description
    }

    pub fn reported_by(&self) -> Option<&str> {
        self.reported_by.as_deref()
    }

    pub fn state(&self) -> &ReportState {
        &self.state
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> ReportStatus {
        match self.state {
            ReportState::Submitted => ReportStatus::Submitted,
            ReportState::Validated | ReportState::Processed { .. } => ReportStatus::Validated,
            ReportState::Resolved { .. } => ReportStatus::Resolved,
        }
    }

    pub fn ticket_id(&self) -> Option<TicketId> {
        match self.state {
            ReportState::Processed { ticket_id } | ReportState::Resolved { ticket_id, .. } => {
                Some(ticket_id)
            }
            ReportState::Submitted | ReportState::Validated => None,
        }
    }

    pub fn operator_notes(&self) -> Option<&str> {
        match &self.state {
            ReportState::Resolved { operator_notes, .. } => operator_notes.as_deref(),
            _ => None,
        }
    }

    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        match self.state {
            ReportState::Resolved { resolved_at, .. } => Some(resolved_at),
            _ => None,
        }
    }

    /// Every report that has not been resolved yet
    pub fn is_open(&self) -> bool {
        !matches!(self.state, ReportState::Resolved { .. })
    }

    /// Check the report against facts about its station.
    ///
    /// Moves `Submitted` to `Validated` only when the station exists and is
    /// operational. Otherwise the state is left as is and `false` returned.
    pub fn validate(&mut self, station_exists: bool, station_is_operational: bool) -> bool {
        if self.state != ReportState::Submitted {
            return false;
        }
        if !station_exists || !station_is_operational {
            return false;
        }
        self.state = ReportState::Validated;
        true
    }

    pub(crate) fn assign_ticket(&mut self, ticket_id: TicketId) -> DomainResult<()> {
        match self.state {
            ReportState::Validated => {
                self.state = ReportState::Processed { ticket_id };
                Ok(())
            }
            _ => Err(DomainError::InvalidTransition {
                from: self.state.label(),
                action: "assign a ticket to",
            }),
        }
    }

    pub(crate) fn resolve(&mut self, operator_notes: Option<String>) -> DomainResult<TicketId> {
        match self.state {
            ReportState::Processed { ticket_id } => {
                self.state = ReportState::Resolved {
                    ticket_id,
                    resolved_at: Utc::now(),
                    operator_notes: operator_notes.filter(|n| !n.trim().is_empty()),
                };
                Ok(ticket_id)
            }
            ReportState::Resolved { ticket_id, .. } => {
                Err(DomainError::ReportAlreadyResolved(ticket_id.to_string()))
            }
            _ => Err(DomainError::InvalidTransition {
                from: self.state.label(),
                action: "resolve",
            }),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
