//! Reporting use cases: malfunction intake, resolution and the dashboard

pub mod create_report;
pub mod dashboard;
pub mod dto;
pub mod resolve_report;

pub use create_report::CreateMalfunctionReportUseCase;
pub use dashboard::{DashboardOverview, DashboardQuery};
pub use dto::{
    CreateReportRequest, CreateReportResponse, ReportView, ResolveReportRequest,
    ResolveReportResponse,
};
pub use resolve_report::ResolveMalfunctionUseCase;
