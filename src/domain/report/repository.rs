//! Malfunction report repository interface

use async_trait::async_trait;

use super::model::MalfunctionReport;
use crate::domain::common::{ReportId, StationId, TicketId};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Insert or replace a report
    async fn save(&self, report: MalfunctionReport) -> DomainResult<()>;

    async fn find_by_id(&self, id: &ReportId) -> DomainResult<Option<MalfunctionReport>>;

    /// All reports ever filed against a station
    async fn find_by_station(&self, station_id: &StationId)
        -> DomainResult<Vec<MalfunctionReport>>;

    async fn find_all(&self) -> DomainResult<Vec<MalfunctionReport>>;

    /// Find the report carrying `ticket_id`.
    ///
    /// Scans all reports; implementations with an index should override this.
    async fn find_by_ticket(&self, ticket_id: &TicketId) -> DomainResult<Option<MalfunctionReport>> {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .find(|r| r.ticket_id() == Some(*ticket_id)))
    }
}
