//! # Station Desk
//!
//! Discovery of Berlin EV charging stations and the malfunction-report
//! workflow that takes a station out of service until an operator resolves
//! the ticket.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Value objects, the station and report aggregates,
//!   repository traits and the malfunction workflow service
//! - **application**: Use cases and DTOs for callers
//! - **infrastructure**: In-memory storage
//! - **config** / **logging**: TOML configuration and tracing setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod shared;

pub use config::{default_config_path, AppConfig, LoggingConfig, StationSeed};
pub use logging::init_tracing;

pub use domain::{
    DomainError, DomainResult, MalfunctionReport, MalfunctionReportService, MalfunctionType,
    OperationalStation, PostalCode, ProcessingResult, RepositoryProvider, ResolutionResult,
    StationId, StationStatus, TicketId,
};
pub use infrastructure::InMemoryRepositoryProvider;
pub use shared::errors::AppError;
