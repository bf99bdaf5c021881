//! In-memory storage implementation
//!
//! Process-scoped state: created at startup, emptied only by `clear()`.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::{
    DomainResult, MalfunctionReport, OperationalStation, PostalCode, ReportId, ReportRepository,
    RepositoryProvider, StationId, StationRepository, TicketId,
};

// ── Stations ────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryStationRepository {
    stations: DashMap<StationId, OperationalStation>,
}

impl InMemoryStationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove(&self, id: &StationId) -> Option<OperationalStation> {
        self.stations.remove(id).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn clear(&self) {
        self.stations.clear();
    }
}

#[async_trait]
impl StationRepository for InMemoryStationRepository {
    async fn save(&self, station: OperationalStation) -> DomainResult<()> {
        self.stations.insert(station.id.clone(), station);
        Ok(())
    }

    async fn find_by_id(&self, id: &StationId) -> DomainResult<Option<OperationalStation>> {
        Ok(self.stations.get(id).map(|s| s.clone()))
    }

    async fn find_by_postal_code(
        &self,
        postal_code: &PostalCode,
    ) -> DomainResult<Vec<OperationalStation>> {
        Ok(self
            .stations
            .iter()
            .filter(|s| &s.postal_code == postal_code)
            .map(|s| s.clone())
            .collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<OperationalStation>> {
        Ok(self.stations.iter().map(|s| s.value().clone()).collect())
    }

    async fn exists(&self, id: &StationId) -> DomainResult<bool> {
        Ok(self.stations.contains_key(id))
    }
}

// ── Reports ─────────────────────────────────────────────────────

/// Report storage with a ticket → report index
#[derive(Default)]
pub struct InMemoryReportRepository {
    reports: DashMap<ReportId, MalfunctionReport>,
    tickets: DashMap<TicketId, ReportId>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn clear(&self) {
        self.tickets.clear();
        self.reports.clear();
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn save(&self, report: MalfunctionReport) -> DomainResult<()> {
        if let Some(ticket_id) = report.ticket_id() {
            self.tickets.insert(ticket_id, report.id());
        }
        self.reports.insert(report.id(), report);
        Ok(())
    }

    async fn find_by_id(&self, id: &ReportId) -> DomainResult<Option<MalfunctionReport>> {
        Ok(self.reports.get(id).map(|r| r.clone()))
    }

    async fn find_by_station(
        &self,
        station_id: &StationId,
    ) -> DomainResult<Vec<MalfunctionReport>> {
        Ok(self
            .reports
            .iter()
            .filter(|r| r.station_id() == station_id)
            .map(|r| r.clone())
            .collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<MalfunctionReport>> {
        Ok(self.reports.iter().map(|r| r.value().clone()).collect())
    }

    async fn find_by_ticket(&self, ticket_id: &TicketId) -> DomainResult<Option<MalfunctionReport>> {
        let Some(report_id) = self.tickets.get(ticket_id).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.reports.get(&report_id).map(|r| r.clone()))
    }
}

// ── Provider ────────────────────────────────────────────────────

/// In-memory repositories for development and testing
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    stations: InMemoryStationRepository,
    reports: InMemoryReportRepository,
    pair_writes: Mutex<()>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider pre-populated with the given stations
    pub fn with_stations(stations: impl IntoIterator<Item = OperationalStation>) -> Self {
        let provider = Self::new();
        for station in stations {
            provider.stations.stations.insert(station.id.clone(), station);
        }
        provider
    }

    pub fn station_store(&self) -> &InMemoryStationRepository {
        &self.stations
    }

    pub fn report_store(&self) -> &InMemoryReportRepository {
        &self.reports
    }

    pub fn remove_station(&self, id: &StationId) -> Option<OperationalStation> {
        self.stations.remove(id)
    }

    /// Drop all stations and reports
    pub fn clear(&self) {
        self.reports.clear();
        self.stations.clear();
    }
}

#[async_trait]
impl RepositoryProvider for InMemoryRepositoryProvider {
    fn stations(&self) -> &dyn StationRepository {
        &self.stations
    }

    fn reports(&self) -> &dyn ReportRepository {
        &self.reports
    }

    async fn save_report_with_station(
        &self,
        report: MalfunctionReport,
        station: OperationalStation,
    ) -> DomainResult<()> {
        // Inserts cannot fail, so holding the lock across both keeps the pair consistent
        let _guard = self.pair_writes.lock().await;
        self.reports.save(report).await?;
        self.stations.save(station).await?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MalfunctionType, ReportDescription, StationStatus};

    fn station(id: &str, postal_code: &str) -> OperationalStation {
        OperationalStation::new(
            StationId::new(id).unwrap(),
            format!("Station {}", id),
            PostalCode::new(postal_code).unwrap(),
        )
    }

    fn report(station_id: &str) -> MalfunctionReport {
        MalfunctionReport::new(
            StationId::new(station_id).unwrap(),
            MalfunctionType::NotCharging,
            ReportDescription::new("Vehicle not charging at all").unwrap(),
            None,
        )
    }

    #[tokio::test]
    async fn station_save_and_lookup() {
        let repo = InMemoryStationRepository::new();
        repo.save(station("STATION-001", "10178")).await.unwrap();

        let id = StationId::new("STATION-001").unwrap();
        assert!(repo.exists(&id).await.unwrap());
        assert_eq!(repo.find_by_id(&id).await.unwrap().unwrap().name, "Station STATION-001");
        assert!(!repo
            .exists(&StationId::new("STATION-404").unwrap())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn station_save_replaces_existing() {
        let repo = InMemoryStationRepository::new();
        let mut s = station("STATION-001", "10178");
        repo.save(s.clone()).await.unwrap();

        s.mark_as_defective().unwrap();
        repo.save(s).await.unwrap();

        assert_eq!(repo.len(), 1);
        let stored = repo
            .find_by_id(&StationId::new("STATION-001").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), StationStatus::Defective);
    }

    #[tokio::test]
    async fn stations_by_postal_code() {
        let repo = InMemoryStationRepository::new();
        repo.save(station("STATION-001", "10178")).await.unwrap();
        repo.save(station("STATION-002", "10178")).await.unwrap();
        repo.save(station("STATION-003", "10785")).await.unwrap();

        let mitte = repo
            .find_by_postal_code(&PostalCode::new("10178").unwrap())
            .await
            .unwrap();
        assert_eq!(mitte.len(), 2);
        assert!(mitte.iter().all(|s| s.postal_code.value() == "10178"));

        let none = repo
            .find_by_postal_code(&PostalCode::new("12345").unwrap())
            .await
            .unwrap();
        assert!(none.is_empty());
        assert_eq!(repo.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn reports_by_station() {
        let repo = InMemoryReportRepository::new();
        repo.save(report("STATION-001")).await.unwrap();
        repo.save(report("STATION-001")).await.unwrap();
        repo.save(report("STATION-002")).await.unwrap();

        let found = repo
            .find_by_station(&StationId::new("STATION-001").unwrap())
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(repo.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn ticket_index_follows_saves() {
        let repo = InMemoryReportRepository::new();
        let mut r = report("STATION-001");
        repo.save(r.clone()).await.unwrap();

        let ticket = TicketId::new();
        assert!(repo.find_by_ticket(&ticket).await.unwrap().is_none());

        assert!(r.validate(true, true));
        r.assign_ticket(ticket).unwrap();
        repo.save(r.clone()).await.unwrap();

        let found = repo.find_by_ticket(&ticket).await.unwrap().unwrap();
        assert_eq!(found.id(), r.id());
    }

    #[tokio::test]
    async fn pair_write_stores_both() {
        let provider = InMemoryRepositoryProvider::with_stations([station("STATION-001", "10178")]);
        let mut s = provider
            .stations()
            .find_by_id(&StationId::new("STATION-001").unwrap())
            .await
            .unwrap()
            .unwrap();
        s.mark_as_defective().unwrap();
        let r = report("STATION-001");
        let report_id = r.id();

        provider.save_report_with_station(r, s).await.unwrap();

        assert!(provider.reports().find_by_id(&report_id).await.unwrap().is_some());
        let stored = provider
            .stations()
            .find_by_id(&StationId::new("STATION-001").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.is_operational());
    }

    #[tokio::test]
    async fn clear_empties_everything() {
        let provider = InMemoryRepositoryProvider::with_stations([station("STATION-001", "10178")]);
        provider.reports().save(report("STATION-001")).await.unwrap();

        provider.clear();

        assert!(provider.station_store().is_empty());
        assert!(provider.report_store().is_empty());
    }
}
