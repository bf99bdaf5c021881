//! Request / response DTOs for the reporting use cases

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{MalfunctionReport, MalfunctionType, ReportId, ReportStatus, TicketId};
use crate::shared::not_blank;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReportRequest {
    #[validate(custom(function = "not_blank", message = "Station ID cannot be empty"))]
    pub station_id: String,
    pub malfunction_type: MalfunctionType,
    #[validate(custom(function = "not_blank", message = "Description cannot be empty"))]
    pub description: String,
    #[validate(length(max = 200, message = "Reporter contact too long (max 200 characters)"))]
    pub reported_by: Option<String>,
}

impl CreateReportRequest {
    pub fn new(
        station_id: impl Into<String>,
        malfunction_type: MalfunctionType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            station_id: station_id.into(),
            malfunction_type,
            description: description.into(),
            reported_by: None,
        }
    }

    pub fn reported_by(mut self, contact: impl Into<String>) -> Self {
        self.reported_by = Some(contact.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateReportResponse {
    /// Set once the report was stored, even if processing then failed
    pub report_id: Option<ReportId>,
    pub ticket_id: Option<TicketId>,
    pub success: bool,
    pub errors: Vec<String>,
}

impl CreateReportResponse {
    pub fn failed(errors: Vec<String>) -> Self {
        Self {
            report_id: None,
            ticket_id: None,
            success: false,
            errors,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResolveReportRequest {
    #[validate(custom(function = "not_blank", message = "Ticket ID cannot be empty"))]
    pub ticket_id: String,
    #[validate(length(max = 1000, message = "Operator notes too long (max 1000 characters)"))]
    pub operator_notes: Option<String>,
}

impl ResolveReportRequest {
    pub fn new(ticket_id: impl Into<String>) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            operator_notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.operator_notes = Some(notes.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveReportResponse {
    pub success: bool,
    pub ticket_id: String,
    pub station_id: Option<String>,
    pub message: String,
}

impl ResolveReportResponse {
    pub fn failed(ticket_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            ticket_id: ticket_id.into(),
            station_id: None,
            message: message.into(),
        }
    }
}

/// Read model of a report for listings
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub report_id: ReportId,
    pub station_id: String,
    pub malfunction_type: MalfunctionType,
    pub description: String,
    pub reported_by: Option<String>,
    pub status: ReportStatus,
    pub ticket_id: Option<TicketId>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub operator_notes: Option<String>,
}

impl From<&MalfunctionReport> for ReportView {
    fn from(r: &MalfunctionReport) -> Self {
        Self {
            report_id: r.id(),
            station_id: r.station_id().to_string(),
            malfunction_type: r.malfunction_type(),
            description: r.description().to_string(),
            reported_by: r.reported_by().map(String::from),
            status: r.status(),
            ticket_id: r.ticket_id(),
            created_at: r.created_at(),
            resolved_at: r.resolved_at(),
            operator_notes: r.operator_notes().map(String::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_fail_validation() {
        let request = CreateReportRequest::new("  ", MalfunctionType::Other, "");
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn valid_request_passes() {
        let request = CreateReportRequest::new(
            "STATION-001",
            MalfunctionType::NotCharging,
            "Vehicle not charging properly",
        )
        .reported_by("user@example.com");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn oversized_notes_fail_validation() {
        let request = ResolveReportRequest::new("abc").with_notes("x".repeat(1001));
        assert!(request.validate().is_err());
    }

    #[test]
    fn request_deserializes_snake_case_type() {
        let request: CreateReportRequest = serde_json::from_str(
            r#"{"station_id":"STATION-001","malfunction_type":"payment_failure","description":"Terminal declines every card","reported_by":null}"#,
        )
        .unwrap();
        assert_eq!(request.malfunction_type, MalfunctionType::PaymentFailure);
    }
}
