//! Malfunction report aggregate
//!
//! Contains the MalfunctionReport entity, its processing state machine,
//! the validated description value object and the repository interface.

pub mod description;
pub mod model;
pub mod repository;

pub use description::ReportDescription;
pub use model::{MalfunctionReport, MalfunctionType, ReportState, ReportStatus};
pub use repository::ReportRepository;
