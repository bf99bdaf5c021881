//! Domain services
//!
//! Business logic spanning more than one aggregate. The malfunction
//! workflow coordinates reports and stations without either entity holding
//! a reference to the other.

pub mod malfunction_report;

pub use malfunction_report::{MalfunctionReportService, ProcessingResult, ResolutionResult};
