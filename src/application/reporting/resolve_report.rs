//! Operator resolution of a ticket

use std::sync::Arc;

use tracing::{error, info, warn};
use validator::Validate;

use super::dto::{ResolveReportRequest, ResolveReportResponse};
use crate::domain::{MalfunctionReportService, TicketId};
use crate::shared::validation_messages;

pub struct ResolveMalfunctionUseCase {
    service: Arc<MalfunctionReportService>,
}

impl ResolveMalfunctionUseCase {
    pub fn new(service: Arc<MalfunctionReportService>) -> Self {
        Self { service }
    }

    pub async fn execute(&self, request: ResolveReportRequest) -> ResolveReportResponse {
        if let Err(errors) = request.validate() {
            return ResolveReportResponse::failed(
                request.ticket_id,
                validation_messages(&errors).join("; "),
            );
        }

        let ticket_id = match TicketId::parse(&request.ticket_id) {
            Ok(id) => id,
            Err(_) => {
                return ResolveReportResponse::failed(
                    request.ticket_id.clone(),
                    format!("Invalid ticket ID format: {}", request.ticket_id),
                );
            }
        };

        match self
            .service
            .resolve_malfunction(&ticket_id, request.operator_notes)
            .await
        {
            Ok(result) => match result.station_id {
                Some(station_id) if result.success => {
                    info!(%ticket_id, %station_id, "Malfunction resolved, station available again");
                    ResolveReportResponse {
                        success: true,
                        ticket_id: request.ticket_id,
                        station_id: Some(station_id.to_string()),
                        message: format!("Malfunction resolved for station {}", station_id),
                    }
                }
                _ => {
                    warn!(%ticket_id, errors = ?result.errors, "Resolution refused");
                    ResolveReportResponse::failed(request.ticket_id, result.errors.join("; "))
                }
            },
            Err(e) => {
                error!(%ticket_id, error = %e, "Resolution failed");
                ResolveReportResponse::failed(request.ticket_id, format!("Unexpected error: {}", e))
            }
        }
    }
}
