//! Malfunction report workflow
//!
//! Submit → process (validate, ticket, station defective) → resolve
//! (report resolved, station available). Business-rule failures come back
//! as `ProcessingResult` / `ResolutionResult` values; `Err` is reserved for
//! malformed input and storage failures.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::domain::common::{ReportId, StationId, TicketId};
use crate::domain::report::{MalfunctionReport, MalfunctionType, ReportDescription, ReportState};
use crate::domain::repositories::{DomainResult, RepositoryProvider};
use crate::shared::errors::DomainError;

/// Outcome of processing a submitted report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingResult {
    pub success: bool,
    pub ticket_id: Option<TicketId>,
    pub errors: Vec<String>,
}

impl ProcessingResult {
    pub fn accepted(ticket_id: TicketId) -> Self {
        Self {
            success: true,
            ticket_id: Some(ticket_id),
            errors: Vec::new(),
        }
    }

    pub fn rejected(error: DomainError) -> Self {
        Self {
            success: false,
            ticket_id: None,
            errors: vec![error.to_string()],
        }
    }
}

/// Outcome of resolving a ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    pub success: bool,
    pub ticket_id: TicketId,
    /// Station put back into service, set on success only
    pub station_id: Option<StationId>,
    pub errors: Vec<String>,
}

impl ResolutionResult {
    pub fn resolved(ticket_id: TicketId, station_id: StationId) -> Self {
        Self {
            success: true,
            ticket_id,
            station_id: Some(station_id),
            errors: Vec::new(),
        }
    }

    pub fn failed(ticket_id: TicketId, error: DomainError) -> Self {
        Self {
            success: false,
            ticket_id,
            station_id: None,
            errors: vec![error.to_string()],
        }
    }
}

/// Coordinates station and report repositories.
///
/// Processing and resolution are serialised per station, so a station can
/// never be marked defective and available by interleaving calls.
pub struct MalfunctionReportService {
    repos: Arc<dyn RepositoryProvider>,
    station_locks: DashMap<StationId, Arc<Mutex<()>>>,
}

impl MalfunctionReportService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            station_locks: DashMap::new(),
        }
    }

    pub fn repositories(&self) -> &Arc<dyn RepositoryProvider> {
        &self.repos
    }

    fn station_lock(&self, station_id: &StationId) -> Arc<Mutex<()>> {
        self.station_locks
            .entry(station_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    // ── Commands ────────────────────────────────────────────────

    /// Record a new report in `Submitted` state.
    ///
    /// Only checks the input syntactically; whether the station exists is
    /// decided when the report is processed.
    pub async fn submit_malfunction_report(
        &self,
        station_id: &str,
        malfunction_type: MalfunctionType,
        description: &str,
        reported_by: Option<String>,
    ) -> DomainResult<ReportId> {
        let station_id = StationId::new(station_id)?;
        let description = ReportDescription::new(description)?;

        let report = MalfunctionReport::new(station_id, malfunction_type, description, reported_by);
        let report_id = report.id();
        self.repos.reports().save(report).await?;

        Ok(report_id)
    }

    /// Validate a submitted report against its station and open a ticket.
    ///
    /// On success the report carries a fresh ticket and the station is
    /// defective; both are saved together. Nothing is saved on failure.
    pub async fn process_malfunction_report(
        &self,
        report_id: &ReportId,
    ) -> DomainResult<ProcessingResult> {
        let Some(report) = self.repos.reports().find_by_id(report_id).await? else {
            return Ok(ProcessingResult::rejected(DomainError::ReportNotFound(
                report_id.to_string(),
            )));
        };

        let lock = self.station_lock(report.station_id());
        let _guard = lock.lock().await;

        // Re-read under the lock; another call may have processed it meanwhile
        let Some(mut report) = self.repos.reports().find_by_id(report_id).await? else {
            return Ok(ProcessingResult::rejected(DomainError::ReportNotFound(
                report_id.to_string(),
            )));
        };
        if *report.state() != ReportState::Submitted {
            return Ok(ProcessingResult::rejected(DomainError::InvalidTransition {
                from: report.state().label(),
                action: "process",
            }));
        }

        let station_id = report.station_id().clone();
        let station = self.repos.stations().find_by_id(&station_id).await?;
        let station_exists = station.is_some();
        let station_is_operational = station.as_ref().is_some_and(|s| s.is_operational());

        if !report.validate(station_exists, station_is_operational) {
            let error = if station_exists {
                DomainError::StationAlreadyDefective(station_id.to_string())
            } else {
                DomainError::StationNotFound(station_id.to_string())
            };
            return Ok(ProcessingResult::rejected(error));
        }
        let Some(mut station) = station else {
            return Ok(ProcessingResult::rejected(DomainError::StationNotFound(
                station_id.to_string(),
            )));
        };

        let ticket_id = TicketId::new();
        if let Err(e) = report
            .assign_ticket(ticket_id)
            .and_then(|_| station.mark_as_defective())
        {
            return Ok(ProcessingResult::rejected(e));
        }

        self.repos.save_report_with_station(report, station).await?;

        Ok(ProcessingResult::accepted(ticket_id))
    }

    /// Close the ticket and put its station back into service.
    pub async fn resolve_malfunction(
        &self,
        ticket_id: &TicketId,
        operator_notes: Option<String>,
    ) -> DomainResult<ResolutionResult> {
        let Some(report) = self.repos.reports().find_by_ticket(ticket_id).await? else {
            return Ok(ResolutionResult::failed(
                *ticket_id,
                DomainError::TicketNotFound(ticket_id.to_string()),
            ));
        };

        let lock = self.station_lock(report.station_id());
        let _guard = lock.lock().await;

        let Some(mut report) = self.repos.reports().find_by_ticket(ticket_id).await? else {
            return Ok(ResolutionResult::failed(
                *ticket_id,
                DomainError::TicketNotFound(ticket_id.to_string()),
            ));
        };
        if let Err(e) = report.resolve(operator_notes) {
            return Ok(ResolutionResult::failed(*ticket_id, e));
        }

        let station_id = report.station_id().clone();
        let Some(mut station) = self.repos.stations().find_by_id(&station_id).await? else {
            return Ok(ResolutionResult::failed(
                *ticket_id,
                DomainError::StationNotFound(station_id.to_string()),
            ));
        };
        if let Err(e) = station.mark_as_available() {
            return Ok(ResolutionResult::failed(*ticket_id, e));
        }

        self.repos.save_report_with_station(report, station).await?;

        Ok(ResolutionResult::resolved(*ticket_id, station_id))
    }

    // ── Queries ─────────────────────────────────────────────────

    /// All reports, oldest first.
    pub async fn get_all_reports(&self) -> DomainResult<Vec<MalfunctionReport>> {
        let mut reports = self.repos.reports().find_all().await?;
        reports.sort_by_key(|r| r.created_at());
        Ok(reports)
    }

    pub async fn get_report(&self, report_id: &ReportId) -> DomainResult<Option<MalfunctionReport>> {
        self.repos.reports().find_by_id(report_id).await
    }

    pub async fn get_report_by_ticket(
        &self,
        ticket_id: &TicketId,
    ) -> DomainResult<Option<MalfunctionReport>> {
        self.repos.reports().find_by_ticket(ticket_id).await
    }
}

// ── Tests ──────────────────────────────────────────────────────
