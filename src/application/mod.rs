//! Application layer: use cases and DTOs over the domain service
//!
//! Use cases never let an error escape to the caller: business failures and
//! unexpected errors alike are turned into response values.

pub mod discovery;
pub mod reporting;

pub use discovery::{SearchStationsUseCase, StationView};
pub use reporting::{
    CreateMalfunctionReportUseCase, CreateReportRequest, CreateReportResponse, DashboardOverview,
    DashboardQuery, ReportView, ResolveMalfunctionUseCase, ResolveReportRequest,
    ResolveReportResponse,
};
