//! Repository access for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to the per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use async_trait::async_trait;

use super::report::{MalfunctionReport, ReportRepository};
use super::station::{OperationalStation, StationRepository};
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let station = repos.stations().find_by_id(&station_id).await?;
///     let open = repos.reports().find_by_station(&station_id).await?;
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    fn stations(&self) -> &dyn StationRepository;
    fn reports(&self) -> &dyn ReportRepository;

    /// Persist a report together with the station it references.
    ///
    /// Either both are stored or neither is; other writers never observe
    /// one without the other.
    async fn save_report_with_station(
        &self,
        report: MalfunctionReport,
        station: OperationalStation,
    ) -> DomainResult<()>;
}
