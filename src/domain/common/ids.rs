//! UUID-backed identifiers for reports and tickets

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::errors::DomainError;

/// Identity of a malfunction report, generated on intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(Uuid);

impl ReportId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| DomainError::validation("Invalid report ID format"))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ticket handed to operators once a report is accepted.
/// A fresh ticket is generated for every processing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(Uuid);

impl TicketId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::validation("Ticket ID cannot be empty"));
        }
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::validation("Invalid ticket ID format"))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TicketId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TicketId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(TicketId::new(), TicketId::new());
        assert_ne!(ReportId::new(), ReportId::new());
    }

    #[test]
    fn ticket_parse_accepts_display_output() {
        let ticket = TicketId::new();
        let parsed = TicketId::parse(&ticket.to_string()).unwrap();
        assert_eq!(parsed, ticket);
    }

    #[test]
    fn ticket_parse_rejects_garbage() {
        let err = TicketId::parse("not-a-valid-uuid").unwrap_err();
        assert!(err.to_string().contains("Invalid ticket ID format"));

        let err = TicketId::parse("  ").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }
}
