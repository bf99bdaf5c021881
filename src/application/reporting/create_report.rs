//! Submit-and-process in one step

use std::sync::Arc;

use tracing::{error, info, warn};
use validator::Validate;

use super::dto::{CreateReportRequest, CreateReportResponse};
use crate::domain::{DomainError, MalfunctionReportService};
use crate::shared::validation_messages;

/// Files a malfunction report and immediately runs it through processing.
///
/// Never returns an error: every failure ends up in the response.
pub struct CreateMalfunctionReportUseCase {
    service: Arc<MalfunctionReportService>,
}

impl CreateMalfunctionReportUseCase {
    pub fn new(service: Arc<MalfunctionReportService>) -> Self {
        Self { service }
    }

    pub async fn execute(&self, request: CreateReportRequest) -> CreateReportResponse {
        if let Err(errors) = request.validate() {
            return CreateReportResponse::failed(validation_messages(&errors));
        }

        let report_id = match self
            .service
            .submit_malfunction_report(
                &request.station_id,
                request.malfunction_type,
                &request.description,
                request.reported_by,
            )
            .await
        {
            Ok(id) => id,
            Err(DomainError::Validation(msg)) => {
                warn!(station_id = %request.station_id, reason = %msg, "Report rejected on intake");
                return CreateReportResponse::failed(vec![msg]);
            }
            Err(e) => {
                error!(station_id = %request.station_id, error = %e, "Report submission failed");
                return CreateReportResponse::failed(vec![format!("Unexpected error: {}", e)]);
            }
        };

        match self.service.process_malfunction_report(&report_id).await {
            Ok(result) => {
                if let Some(ticket_id) = result.ticket_id {
                    info!(
                        %report_id,
                        %ticket_id,
                        station_id = %request.station_id,
                        malfunction_type = %request.malfunction_type,
                        "Ticket opened, station marked defective"
                    );
                } else {
                    warn!(%report_id, errors = ?result.errors, "Report not accepted");
                }
                CreateReportResponse {
                    report_id: Some(report_id),
                    ticket_id: result.ticket_id,
                    success: result.success,
                    errors: result.errors,
                }
            }
            Err(e) => {
                error!(%report_id, error = %e, "Report processing failed");
                CreateReportResponse {
                    report_id: Some(report_id),
                    ticket_id: None,
                    success: false,
                    errors: vec![format!("Unexpected error: {}", e)],
                }
            }
        }
    }
}
