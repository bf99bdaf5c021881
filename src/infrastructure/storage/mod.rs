//! Storage implementations

mod memory;

pub use memory::{InMemoryReportRepository, InMemoryRepositoryProvider, InMemoryStationRepository};
