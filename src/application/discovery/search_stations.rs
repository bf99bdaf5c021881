//! Station search by postal code or id

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::domain::{
    Coordinates, DomainError, DomainResult, OperationalStation, PostalCode, RepositoryProvider,
    StationId, StationStatus,
};

/// Read model of a station for listings
#[derive(Debug, Clone, Serialize)]
pub struct StationView {
    pub station_id: String,
    pub name: String,
    pub postal_code: String,
    pub address: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub status: StationStatus,
    pub is_operational: bool,
}

impl From<&OperationalStation> for StationView {
    fn from(s: &OperationalStation) -> Self {
        Self {
            station_id: s.id.to_string(),
            name: s.name.clone(),
            postal_code: s.postal_code.to_string(),
            address: s.address.clone(),
            coordinates: s.coordinates,
            status: s.status(),
            is_operational: s.is_operational(),
        }
    }
}

pub struct SearchStationsUseCase {
    repos: Arc<dyn RepositoryProvider>,
}

impl SearchStationsUseCase {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Stations in a Berlin postal code area, sorted by id.
    ///
    /// Fails with a validation error for a malformed postal code.
    pub async fn by_postal_code(&self, postal_code: &str) -> DomainResult<Vec<OperationalStation>> {
        let postal_code = PostalCode::new(postal_code)?;
        let mut stations = self.repos.stations().find_by_postal_code(&postal_code).await?;
        stations.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(%postal_code, count = stations.len(), "Station search");
        Ok(stations)
    }

    pub async fn by_id(&self, station_id: &str) -> DomainResult<OperationalStation> {
        let id = StationId::new(station_id)?;
        self.repos
            .stations()
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::StationNotFound(id.to_string()))
    }

    pub async fn all(&self) -> DomainResult<Vec<OperationalStation>> {
        let mut stations = self.repos.stations().find_all().await?;
        stations.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(stations)
    }
}
