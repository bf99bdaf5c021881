pub mod common;
pub mod report;
pub mod repositories;
pub mod services;
pub mod station;

// Re-export commonly used types
pub use common::{PostalCode, ReportId, StationId, TicketId};
pub use report::{
    MalfunctionReport, MalfunctionType, ReportDescription, ReportRepository, ReportState,
    ReportStatus,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use services::{MalfunctionReportService, ProcessingResult, ResolutionResult};
pub use station::{Coordinates, OperationalStation, StationRepository, StationStatus};

pub use crate::shared::errors::DomainError;
