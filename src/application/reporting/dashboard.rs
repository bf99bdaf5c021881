//! Aggregate figures for the operator dashboard

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use super::dto::ReportView;
use crate::domain::{DomainResult, MalfunctionReportService, StationStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardOverview {
    pub total_reports: usize,
    pub open_reports: usize,
    pub resolved_reports: usize,
    pub defective_stations: usize,
    /// Report counts keyed by malfunction type
    pub by_type: BTreeMap<String, usize>,
}

pub struct DashboardQuery {
    service: Arc<MalfunctionReportService>,
}

impl DashboardQuery {
    pub fn new(service: Arc<MalfunctionReportService>) -> Self {
        Self { service }
    }

    pub async fn overview(&self) -> DomainResult<DashboardOverview> {
        let reports = self.service.get_all_reports().await?;
        let stations = self.service.repositories().stations().find_all().await?;

        let mut overview = DashboardOverview {
            total_reports: reports.len(),
            defective_stations: stations
                .iter()
                .filter(|s| s.status() == StationStatus::Defective)
                .count(),
            ..Default::default()
        };
        for report in &reports {
            if report.is_open() {
                overview.open_reports += 1;
            } else {
                overview.resolved_reports += 1;
            }
            *overview
                .by_type
                .entry(report.malfunction_type().to_string())
                .or_default() += 1;
        }

        Ok(overview)
    }

    /// Open reports that hold a ticket, oldest first
    pub async fn open_tickets(&self) -> DomainResult<Vec<ReportView>> {
        Ok(self
            .service
            .get_all_reports()
            .await?
            .iter()
            .filter(|r| r.is_open() && r.ticket_id().is_some())
            .map(ReportView::from)
            .collect())
    }

    pub async fn all_reports(&self) -> DomainResult<Vec<ReportView>> {
        Ok(self
            .service
            .get_all_reports()
            .await?
            .iter()
            .map(ReportView::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MalfunctionType, OperationalStation, PostalCode, StationId};
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn station(id: &str) -> OperationalStation {
        OperationalStation::new(
            StationId::new(id).unwrap(),
            id,
            PostalCode::new("10178").unwrap(),
        )
    }

    async fn ticket_for(service: &MalfunctionReportService, station_id: &str) -> Option<crate::domain::TicketId> {
        let report_id = service
            .submit_malfunction_report(
                station_id,
                MalfunctionType::NotCharging,
                "Vehicle not charging properly",
                None,
            )
            .await
            .unwrap();
        service
            .process_malfunction_report(&report_id)
            .await
            .unwrap()
            .ticket_id
    }

    #[tokio::test]
    async fn empty_dashboard() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let query = DashboardQuery::new(Arc::new(MalfunctionReportService::new(repos)));
        assert_eq!(query.overview().await.unwrap(), DashboardOverview::default());
        assert!(query.open_tickets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn counts_open_resolved_and_defective() {
        let repos = Arc::new(InMemoryRepositoryProvider::with_stations([
            station("STATION-001"),
            station("STATION-002"),
        ]));
        let service = Arc::new(MalfunctionReportService::new(repos));

        let first = ticket_for(&service, "STATION-001").await.unwrap();
        ticket_for(&service, "STATION-002").await.unwrap();
        // rejected: station already defective, stays submitted and open
        assert!(ticket_for(&service, "STATION-002").await.is_none());
        service.resolve_malfunction(&first, None).await.unwrap();

        let query = DashboardQuery::new(service);
        let overview = query.overview().await.unwrap();
        assert_eq!(overview.total_reports, 3);
        assert_eq!(overview.open_reports, 2);
        assert_eq!(overview.resolved_reports, 1);
        assert_eq!(overview.defective_stations, 1);
        assert_eq!(overview.by_type.get("not_charging"), Some(&3));

        let open = query.open_tickets().await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].station_id, "STATION-002");
        assert_eq!(query.all_reports().await.unwrap().len(), 3);
    }
}
