//! Station repository interface

use async_trait::async_trait;

use super::model::OperationalStation;
use crate::domain::common::{PostalCode, StationId};
use crate::domain::DomainResult;

#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Insert or replace a station
    async fn save(&self, station: OperationalStation) -> DomainResult<()>;

    async fn find_by_id(&self, id: &StationId) -> DomainResult<Option<OperationalStation>>;

    async fn find_by_postal_code(
        &self,
        postal_code: &PostalCode,
    ) -> DomainResult<Vec<OperationalStation>>;

    async fn find_all(&self) -> DomainResult<Vec<OperationalStation>>;

    async fn exists(&self, id: &StationId) -> DomainResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
